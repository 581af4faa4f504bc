use std::time::Duration;

use laptopbay_core::AppError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
    #[error("store call exceeded {0:?}")]
    Timeout(Duration),
    #[error("stored document is not a JSON object")]
    Corrupt,
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Timeout(_) => AppError::gateway_timeout(err),
            _ => AppError::internal(err),
        }
    }
}
