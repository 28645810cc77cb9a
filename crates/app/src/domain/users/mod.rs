//! Users

pub mod data;
pub mod records;
pub mod repositories;
mod restaurant_id;

pub use restaurant_id::derive_restaurant_id;
