//! Order Models

use rust_decimal::Decimal;
use salvo::{oapi::ToSchema, prelude::StatusError};
use serde::{Deserialize, Serialize};

use forchetta_app::domain::{
    carts::CartLine,
    orders::records::{Fulfillment, OrderItem, OrderRecord},
};

/// Pickup or delivery. Delivery needs `indirizzo`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub(crate) struct FulfillmentBody {
    /// `ritiro` or `consegna`
    pub mode: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub indirizzo: Option<String>,
}

impl TryFrom<FulfillmentBody> for Fulfillment {
    type Error = StatusError;

    fn try_from(body: FulfillmentBody) -> Result<Self, Self::Error> {
        match body.mode.trim().to_ascii_lowercase().as_str() {
            "ritiro" => Ok(Fulfillment::Ritiro),
            "consegna" => Ok(Fulfillment::Consegna {
                indirizzo: body.indirizzo.unwrap_or_default(),
            }),
            _ => Err(StatusError::bad_request().brief("fulfillment mode must be ritiro or consegna")),
        }
    }
}

impl From<Fulfillment> for FulfillmentBody {
    fn from(fulfillment: Fulfillment) -> Self {
        match fulfillment {
            Fulfillment::Ritiro => Self {
                mode: "ritiro".to_string(),
                indirizzo: None,
            },
            Fulfillment::Consegna { indirizzo } => Self {
                mode: "consegna".to_string(),
                indirizzo: Some(indirizzo),
            },
        }
    }
}

/// Cart line as held by the client at checkout.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CartLineBody {
    #[serde(default)]
    pub meal_id: Option<u64>,

    pub name: String,

    #[salvo(schema(value_type = f64))]
    pub unit_price: Decimal,

    pub quantity: u32,
    pub restaurant_id: String,

    #[serde(default)]
    pub restaurant_name: Option<String>,

    #[serde(default)]
    pub image: Option<String>,
}

impl From<CartLineBody> for CartLine {
    fn from(line: CartLineBody) -> Self {
        CartLine {
            meal_id: line.meal_id,
            name: line.name,
            unit_price: line.unit_price,
            quantity: line.quantity,
            restaurant_id: line.restaurant_id,
            restaurant_name: line.restaurant_name,
            image: line.image,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct OrderItemResponse {
    pub meal_id: Option<u64>,
    pub name: String,
    pub qty: u32,

    #[salvo(schema(value_type = f64))]
    pub unit_price: Decimal,
}

impl From<OrderItem> for OrderItemResponse {
    fn from(item: OrderItem) -> Self {
        Self {
            meal_id: item.meal_id,
            name: item.name,
            qty: item.qty,
            unit_price: item.unit_price,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct OrderResponse {
    pub id: u64,
    pub customer_id: String,
    pub restaurant_id: Option<String>,
    pub items: Vec<OrderItemResponse>,

    /// Sum of line totals at checkout time
    #[salvo(schema(value_type = f64))]
    pub total: Decimal,

    /// `ordinato`, `preparazione`, `consegna`, `consegnato` or `annullato`
    pub status: String,

    pub fulfillment: FulfillmentBody,
    pub created_at: String,
}

impl From<OrderRecord> for OrderResponse {
    fn from(order: OrderRecord) -> Self {
        Self {
            id: order.id,
            customer_id: order.customer_id,
            restaurant_id: order.restaurant_id,
            items: order.items.into_iter().map(OrderItemResponse::from).collect(),
            total: order.total,
            status: order.status.to_string(),
            fulfillment: order.fulfillment.into(),
            created_at: order.created_at.to_string(),
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use jiff::Timestamp;
    use rust_decimal::Decimal;

    use forchetta_app::domain::orders::{
        records::{Fulfillment, OrderItem, OrderRecord},
        status::OrderStatus,
    };

    pub(crate) fn make_order(id: u64, status: OrderStatus) -> OrderRecord {
        OrderRecord {
            id,
            customer_id: "cliente-1".to_string(),
            restaurant_id: Some("r_1".to_string()),
            items: vec![OrderItem {
                meal_id: Some(3),
                name: "Margherita".to_string(),
                qty: 2,
                unit_price: Decimal::new(950, 2),
            }],
            total: Decimal::new(19, 0),
            status,
            fulfillment: Fulfillment::Ritiro,
            created_at: Timestamp::UNIX_EPOCH,
        }
    }
}
