//! Get Restaurant Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};

use crate::{
    extensions::*,
    restaurants::{errors::into_status_error, models::RestaurantResponse},
    state::State,
};

/// Get Restaurant Handler
#[endpoint(tags("restaurants"), summary = "Get Restaurant")]
pub(crate) async fn handler(
    id: PathParam<String>,
    depot: &mut Depot,
) -> Result<Json<RestaurantResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let restaurant = state
        .app
        .restaurants
        .get_restaurant(&id.into_inner())
        .await
        .map_err(into_status_error)?;

    Ok(Json(restaurant.into()))
}
