//! Meals service errors.

use thiserror::Error;

use crate::{domain::meals::data::MealInputError, store::StoreError};

#[derive(Debug, Error)]
pub enum MealsServiceError {
    #[error("{0}")]
    Validation(String),

    #[error("meal not found")]
    NotFound,

    #[error("meal already exists")]
    Conflict,

    #[error("storage error")]
    Store(#[source] StoreError),
}

impl From<StoreError> for MealsServiceError {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::Duplicate => Self::Conflict,
            StoreError::NotFound => Self::NotFound,
            error => Self::Store(error),
        }
    }
}

impl From<MealInputError> for MealsServiceError {
    fn from(error: MealInputError) -> Self {
        Self::Validation(error.to_string())
    }
}
