//! Orders

pub mod data;
pub mod errors;
pub mod records;
pub mod repositories;
pub mod service;
pub mod status;

pub use errors::OrdersServiceError;
pub use service::*;
