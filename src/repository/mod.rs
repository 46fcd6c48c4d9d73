use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::info;

use crate::config::{Config, StorageBackend};
use crate::db;
use crate::errors::{AppError, StartupError};
use crate::models::Swosh;

pub mod memory;
pub mod postgres;

pub use memory::MemorySwoshRepository;
pub use postgres::PgSwoshRepository;

#[async_trait]
pub trait SwoshRepository: Send + Sync {
    /// Stores a new record. Returns `AppError::Conflict` if the id is taken.
    async fn create(&self, swosh: &Swosh) -> Result<(), AppError>;

    /// Looks up a record by id. Expired records are reported as absent.
    async fn find(&self, id: &str) -> Result<Option<Swosh>, AppError>;

    /// Deletes records whose expiry is at or before `now` and returns how many went.
    async fn purge_expired(&self, now: DateTime<Utc>) -> Result<u64, AppError>;

    async fn ping(&self) -> Result<(), AppError>;

    fn backend_name(&self) -> &'static str;
}

pub async fn from_config(config: &Config) -> Result<Arc<dyn SwoshRepository>, StartupError> {
    let repository: Arc<dyn SwoshRepository> = match config.storage_backend {
        StorageBackend::Postgres => {
            let database_url = config
                .database_url
                .as_deref()
                .ok_or(StartupError::MissingVar("DATABASE_URL"))?;
            let pool = db::connect_db(database_url, config.database_max_connections).await?;
            db::run_migrations(&pool).await?;
            Arc::new(PgSwoshRepository::new(pool))
        }
        StorageBackend::Memory => Arc::new(MemorySwoshRepository::new()),
    };
    info!(backend = repository.backend_name(), "repository ready");
    Ok(repository)
}
