use thiserror::Error;

/// Failures that stop the server before it starts accepting requests.
#[derive(Error, Debug)]
pub enum StartupError {
    #[error("{0} must be set")]
    MissingVar(&'static str),
    #[error("invalid value for {key}: {value:?}")]
    InvalidVar { key: &'static str, value: String },
    #[error("failed to connect to database: {0}")]
    Database(#[from] sqlx::Error),
    #[error("failed to run migrations: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
    #[error("failed to bind listener: {0}")]
    Io(#[from] std::io::Error),
}
