//! Update Restaurant Handler

use std::sync::Arc;

use salvo::{
    oapi::extract::{JsonBody, PathParam},
    prelude::*,
};
use serde_json::Value;

use crate::{
    auth::{ensure_same_restaurant, session_restaurant_id},
    extensions::*,
    restaurants::{
        errors::into_status_error,
        models::{RestaurantResponse, details_from_json},
    },
    state::State,
};

/// Update Restaurant Handler
///
/// Merges the supplied fields into the stored restaurant. A session may only change its own.
#[endpoint(
    tags("restaurants"),
    summary = "Update Restaurant",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Restaurant updated"),
        (status_code = StatusCode::FORBIDDEN, description = "Restaurant belongs to another account"),
        (status_code = StatusCode::NOT_FOUND, description = "Restaurant not found"),
        (status_code = StatusCode::CONFLICT, description = "Partita IVA already registered"),
    ),
)]
pub(crate) async fn handler(
    id: PathParam<String>,
    json: JsonBody<Value>,
    depot: &mut Depot,
) -> Result<Json<RestaurantResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let id = id.into_inner();
    let details = details_from_json(json.into_inner())?;

    if let Some(owned) = session_restaurant_id(depot, state).await? {
        ensure_same_restaurant(&owned, &id)?;
    }

    let restaurant = state
        .app
        .restaurants
        .update_restaurant(&id, details)
        .await
        .map_err(into_status_error)?;

    Ok(Json(restaurant.into()))
}
