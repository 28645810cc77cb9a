//! Update Order Status Handler

use std::sync::Arc;

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};

use forchetta_app::domain::orders::status::OrderStatus;

use crate::{
    auth::session_restaurant_id,
    extensions::*,
    orders::{errors::into_status_error, models::OrderResponse},
    state::State,
};

/// Status Update Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct StatusUpdateRequest {
    /// The next status in sequence, or `annullato`
    pub status: String,
}

/// Update Order Status Handler
///
/// Terminal orders and skipped steps are rejected with 409 and left unchanged. A session may only
/// move orders attributed to its own restaurant.
#[endpoint(
    tags("orders"),
    summary = "Update Order Status",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Status changed"),
        (status_code = StatusCode::BAD_REQUEST, description = "Unknown status"),
        (status_code = StatusCode::FORBIDDEN, description = "Order belongs to another restaurant"),
        (status_code = StatusCode::NOT_FOUND, description = "Order not found"),
        (status_code = StatusCode::CONFLICT, description = "Transition not allowed"),
    ),
)]
pub(crate) async fn handler(
    id: PathParam<u64>,
    json: JsonBody<StatusUpdateRequest>,
    depot: &mut Depot,
) -> Result<Json<OrderResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let id = id.into_inner();
    let target = json
        .into_inner()
        .status
        .parse::<OrderStatus>()
        .or_400("invalid status")?;

    if let Some(owned) = session_restaurant_id(depot, state).await? {
        let order = state
            .app
            .orders
            .get_order(id)
            .await
            .map_err(into_status_error)?;

        let attributed = state
            .app
            .orders
            .order_belongs_to(&order, &owned)
            .await
            .map_err(into_status_error)?;

        if !attributed {
            return Err(StatusError::forbidden().brief("Order belongs to another restaurant"));
        }
    }

    let order = state
        .app
        .orders
        .transition_to(id, target)
        .await
        .map_err(into_status_error)?;

    tracing::info!(order = order.id, status = %order.status, "order status changed");

    Ok(Json(order.into()))
}
