//! Errors shared by the Postgres repositories.

use thiserror::Error;

/// Repository errors.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("record already exists")]
    Duplicate,

    #[error("record not found")]
    NotFound,

    #[error("Database error: {0}")]
    Db(sqlx::Error),
}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        match e {
            sqlx::Error::RowNotFound => StoreError::NotFound,
            sqlx::Error::Database(ref db) if db.is_unique_violation() => StoreError::Duplicate,
            _ => StoreError::Db(e),
        }
    }
}
