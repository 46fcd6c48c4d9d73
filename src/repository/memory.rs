use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use super::SwoshRepository;
use crate::errors::AppError;
use crate::models::Swosh;

/// Keeps everything in a map. Contents are lost on restart.
#[derive(Default)]
pub struct MemorySwoshRepository {
    records: RwLock<HashMap<String, Swosh>>,
}

impl MemorySwoshRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl SwoshRepository for MemorySwoshRepository {
    async fn create(&self, swosh: &Swosh) -> Result<(), AppError> {
        let mut records = self.records.write().await;
        if records.contains_key(&swosh.id) {
            return Err(AppError::Conflict);
        }
        records.insert(swosh.id.clone(), swosh.clone());
        Ok(())
    }

    async fn find(&self, id: &str) -> Result<Option<Swosh>, AppError> {
        let now = Utc::now();
        let records = self.records.read().await;
        Ok(records.get(id).filter(|s| !s.is_expired(now)).cloned())
    }

    async fn purge_expired(&self, now: DateTime<Utc>) -> Result<u64, AppError> {
        let mut records = self.records.write().await;
        let before = records.len();
        records.retain(|_, swosh| !swosh.is_expired(now));
        Ok((before - records.len()) as u64)
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NewSwosh;
    use chrono::TimeDelta;

    fn swosh(id: &str, expires_at: Option<DateTime<Utc>>) -> Swosh {
        let new = NewSwosh {
            payee: "0701234567".into(),
            amount: 42.0,
            description: Some("Pizza".into()),
            expires_at,
        };
        Swosh::new(id.into(), &new, Utc::now())
    }

    #[tokio::test]
    async fn create_then_find() {
        let repo = MemorySwoshRepository::new();
        assert!(repo.is_empty().await);
        let stored = swosh("aaaaaaaaaa", None);
        repo.create(&stored).await.unwrap();
        assert!(!repo.is_empty().await);
        assert_eq!(repo.find("aaaaaaaaaa").await.unwrap(), Some(stored));
        assert_eq!(repo.find("bbbbbbbbbb").await.unwrap(), None);
    }

    #[tokio::test]
    async fn duplicate_id_conflicts() {
        let repo = MemorySwoshRepository::new();
        repo.create(&swosh("aaaaaaaaaa", None)).await.unwrap();
        let err = repo.create(&swosh("aaaaaaaaaa", None)).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict));
        assert_eq!(repo.len().await, 1);
    }

    #[tokio::test]
    async fn expired_records_are_hidden_and_purged() {
        let repo = MemorySwoshRepository::new();
        let past = Utc::now() - TimeDelta::minutes(5);
        let future = Utc::now() + TimeDelta::hours(1);
        repo.create(&swosh("expired000", Some(past))).await.unwrap();
        repo.create(&swosh("current000", Some(future))).await.unwrap();

        assert_eq!(repo.find("expired000").await.unwrap(), None);
        assert!(repo.find("current000").await.unwrap().is_some());

        assert_eq!(repo.purge_expired(Utc::now()).await.unwrap(), 1);
        assert_eq!(repo.len().await, 1);
    }
}
