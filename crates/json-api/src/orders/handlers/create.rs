//! Create Order Handler

use std::sync::Arc;

use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use forchetta_app::domain::{
    carts::{Cart, CartLine},
    orders::data::NewOrder,
};

use crate::{
    extensions::*,
    orders::{
        errors::into_status_error,
        models::{CartLineBody, FulfillmentBody, OrderResponse},
    },
    state::State,
};

/// Checkout Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CreateOrderRequest {
    pub customer_id: String,

    /// Cart lines; repeated dishes are merged and zero quantities dropped
    #[serde(default)]
    pub items: Vec<CartLineBody>,

    pub fulfillment: FulfillmentBody,
}

impl TryFrom<CreateOrderRequest> for NewOrder {
    type Error = StatusError;

    fn try_from(request: CreateOrderRequest) -> Result<Self, Self::Error> {
        let cart = Cart::from_lines(request.items.into_iter().map(CartLine::from));

        Ok(NewOrder {
            customer_id: request.customer_id,
            lines: cart.to_order_lines(),
            fulfillment: request.fulfillment.try_into()?,
        })
    }
}

/// Create Order Handler
#[endpoint(
    tags("orders"),
    summary = "Create Order",
    responses(
        (status_code = StatusCode::CREATED, description = "Order placed"),
        (status_code = StatusCode::BAD_REQUEST, description = "Empty cart or missing delivery address"),
        (status_code = StatusCode::CONFLICT, description = "Order id assignment kept colliding"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreateOrderRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<OrderResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let order = state
        .app
        .orders
        .create_order(json.into_inner().try_into()?)
        .await
        .map_err(into_status_error)?;

    res.add_header(LOCATION, format!("/orders/{}", order.id), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    tracing::info!(order = order.id, total = %order.total, "order placed");

    Ok(Json(order.into()))
}
