//! Get Order Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};

use crate::{
    extensions::*,
    orders::{errors::into_status_error, models::OrderResponse},
    state::State,
};

/// Get Order Handler
#[endpoint(tags("orders"), summary = "Get Order")]
pub(crate) async fn handler(
    id: PathParam<u64>,
    depot: &mut Depot,
) -> Result<Json<OrderResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let order = state
        .app
        .orders
        .get_order(id.into_inner())
        .await
        .map_err(into_status_error)?;

    Ok(Json(order.into()))
}
