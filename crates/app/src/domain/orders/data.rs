//! Orders Data

use rust_decimal::Decimal;

use crate::domain::orders::records::{Fulfillment, OrderItem};

/// One priced line submitted at checkout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderLine {
    pub meal_id: Option<u64>,
    pub name: String,
    pub qty: u32,
    pub unit_price: Decimal,
    pub restaurant_id: Option<String>,
}

impl From<&OrderLine> for OrderItem {
    fn from(line: &OrderLine) -> Self {
        Self {
            meal_id: line.meal_id,
            name: line.name.trim().to_string(),
            qty: line.qty,
            unit_price: line.unit_price,
        }
    }
}

/// Checkout request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrder {
    pub customer_id: String,
    pub lines: Vec<OrderLine>,
    pub fulfillment: Fulfillment,
}

/// Order listing filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderFilter {
    pub customer_id: Option<String>,

    /// Orders attributed to this restaurant.
    pub restaurant_id: Option<String>,
}
