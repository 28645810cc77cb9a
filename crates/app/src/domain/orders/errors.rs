//! Orders service errors.

use thiserror::Error;

use crate::{
    domain::orders::status::{OrderStatus, StatusTransitionError},
    store::StoreError,
};

#[derive(Debug, Error)]
pub enum OrdersServiceError {
    #[error("{0}")]
    Validation(String),

    #[error("cart is empty")]
    EmptyCart,

    #[error("order not found")]
    NotFound,

    #[error("order is already {0}")]
    TerminalState(OrderStatus),

    #[error("cannot move order from {from} to {to}")]
    InvalidTransition { from: OrderStatus, to: OrderStatus },

    #[error("order was modified concurrently")]
    Conflict,

    #[error("storage error")]
    Store(#[source] StoreError),
}

impl From<StoreError> for OrdersServiceError {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::Duplicate => Self::Conflict,
            StoreError::NotFound => Self::NotFound,
            error => Self::Store(error),
        }
    }
}

impl From<StatusTransitionError> for OrdersServiceError {
    fn from(error: StatusTransitionError) -> Self {
        match error {
            StatusTransitionError::Terminal(status) => Self::TerminalState(status),
            StatusTransitionError::Invalid { from, to } => Self::InvalidTransition { from, to },
        }
    }
}
