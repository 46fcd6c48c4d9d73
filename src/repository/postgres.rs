use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use super::SwoshRepository;
use crate::errors::AppError;
use crate::models::Swosh;

pub struct PgSwoshRepository {
    pool: PgPool,
}

impl PgSwoshRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SwoshRepository for PgSwoshRepository {
    async fn create(&self, swosh: &Swosh) -> Result<(), AppError> {
        let result = sqlx::query(
            "INSERT INTO swosh (id, payee, amount, description, expires_at, created_at)
             VALUES ($1, $2, $3, $4, $5, $6)
             ON CONFLICT (id) DO NOTHING",
        )
        .bind(&swosh.id)
        .bind(&swosh.payee)
        .bind(swosh.amount)
        .bind(&swosh.description)
        .bind(swosh.expires_at)
        .bind(swosh.created_at)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::Conflict);
        }
        Ok(())
    }

    async fn find(&self, id: &str) -> Result<Option<Swosh>, AppError> {
        let swosh = sqlx::query_as::<_, Swosh>(
            "SELECT id, payee, amount, description, expires_at, created_at
             FROM swosh
             WHERE id = $1 AND (expires_at IS NULL OR expires_at > now())",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(swosh)
    }

    async fn purge_expired(&self, now: DateTime<Utc>) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM swosh WHERE expires_at <= $1")
            .bind(now)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "postgres"
    }
}
