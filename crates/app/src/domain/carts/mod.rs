//! Carts
//!
//! Client-held shopping carts. A cart lives outside the server until checkout, when its lines
//! become an order through [`Cart::to_order_lines`].

pub mod models;
pub mod storage;

pub use models::*;
pub use storage::*;
