//! Auth service errors.

use thiserror::Error;

use crate::{
    auth::{PasswordHashError, TokenError},
    store::StoreError,
};

#[derive(Debug, Error)]
pub enum AuthServiceError {
    #[error("{0}")]
    Validation(String),

    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("user not found")]
    NotFound,

    #[error("username or email already registered")]
    Conflict,

    #[error("account does not own a restaurant")]
    NotRestaurantOwner,

    #[error("token processing error")]
    Token(#[source] TokenError),

    #[error("password hashing error")]
    Hashing(#[from] PasswordHashError),

    #[error("storage error")]
    Store(#[source] StoreError),
}

impl From<StoreError> for AuthServiceError {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::Duplicate => Self::Conflict,
            StoreError::NotFound => Self::NotFound,
            error => Self::Store(error),
        }
    }
}

impl From<TokenError> for AuthServiceError {
    fn from(error: TokenError) -> Self {
        match error {
            TokenError::Unverifiable | TokenError::Invalid(_) => Self::InvalidCredentials,
            TokenError::Signing(_) => Self::Token(error),
        }
    }
}
