//! Authentication

pub(crate) mod middleware;
mod owner;

pub(crate) use owner::{ensure_same_restaurant, owner_restaurant_id, session_restaurant_id};
