//! Store errors.

use std::io;

use sqlx::error::{DatabaseError, ErrorKind};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("record already exists")]
    Duplicate,

    #[error("record not found")]
    NotFound,

    #[error("storage error")]
    Sql(#[source] sqlx::Error),

    #[error("data file error")]
    Io(#[from] io::Error),

    #[error("data file is not valid JSON")]
    Json(#[from] serde_json::Error),
}

impl From<sqlx::Error> for StoreError {
    fn from(error: sqlx::Error) -> Self {
        if matches!(error, sqlx::Error::RowNotFound) {
            return Self::NotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::Duplicate,
            Some(_) | None => Self::Sql(error),
        }
    }
}
