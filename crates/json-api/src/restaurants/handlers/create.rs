//! Create Restaurant Handler

use std::sync::Arc;

use salvo::{http::header::LOCATION, oapi::extract::JsonBody, prelude::*};
use serde_json::Value;

use crate::{
    extensions::*,
    restaurants::{
        errors::into_status_error,
        models::{RestaurantResponse, details_from_json},
    },
    state::State,
};

/// Create Restaurant Handler
///
/// An omitted `restaurantId` is generated from the current time.
#[endpoint(
    tags("restaurants"),
    summary = "Create Restaurant",
    responses(
        (status_code = StatusCode::CREATED, description = "Restaurant created"),
        (status_code = StatusCode::CONFLICT, description = "Id or partita IVA already registered"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<Value>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<RestaurantResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let details = details_from_json(json.into_inner())?;

    let restaurant = state
        .app
        .restaurants
        .create_restaurant(details)
        .await
        .map_err(into_status_error)?;

    res.add_header(
        LOCATION,
        format!("/restaurant/{}", restaurant.restaurant_id),
        true,
    )
    .or_500("failed to set location header")?
    .status_code(StatusCode::CREATED);

    Ok(Json(restaurant.into()))
}
