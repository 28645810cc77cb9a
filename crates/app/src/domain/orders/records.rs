//! Order Records

use jiff::Timestamp;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::orders::status::OrderStatus;

/// Pickup or delivery choice made at checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum Fulfillment {
    Ritiro,
    Consegna { indirizzo: String },
}

/// Immutable snapshot of a cart line taken at checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    #[serde(default)]
    pub meal_id: Option<u64>,
    pub name: String,
    pub qty: u32,
    pub unit_price: Decimal,
}

impl OrderItem {
    /// `unit_price * qty`, or `None` when the product does not fit a [`Decimal`].
    #[must_use]
    pub fn line_total(&self) -> Option<Decimal> {
        self.unit_price.checked_mul(Decimal::from(self.qty))
    }
}

/// Order Record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRecord {
    pub id: u64,
    pub customer_id: String,

    /// Set when every line came from the same restaurant. Older orders lack it.
    #[serde(default)]
    pub restaurant_id: Option<String>,

    pub items: Vec<OrderItem>,

    /// Sum of the line totals at creation time, never recomputed.
    pub total: Decimal,

    pub status: OrderStatus,
    pub fulfillment: Fulfillment,
    pub created_at: Timestamp,
}
