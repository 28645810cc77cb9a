//! Forchetta Domain Concerns

pub mod carts;
pub mod meals;
pub mod orders;
pub mod restaurants;
pub mod users;
