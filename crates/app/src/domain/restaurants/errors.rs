//! Restaurants service errors.

use thiserror::Error;

use crate::store::StoreError;

#[derive(Debug, Error)]
pub enum RestaurantsServiceError {
    #[error("{0}")]
    Validation(String),

    #[error("restaurant not found")]
    NotFound,

    #[error("restaurant id or partita IVA already registered")]
    Conflict,

    #[error("storage error")]
    Store(#[source] StoreError),
}

impl From<StoreError> for RestaurantsServiceError {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::Duplicate => Self::Conflict,
            StoreError::NotFound => Self::NotFound,
            error => Self::Store(error),
        }
    }
}
