//! Delete Restaurant Meal Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};

use crate::{
    auth::owner_restaurant_id, extensions::*, meals::errors::into_status_error, state::State,
};

/// Delete Restaurant Meal Handler
///
/// Deletes the meal only when `restaurant` owns it; any other meal reads as missing.
#[endpoint(
    tags("meals"),
    summary = "Delete Restaurant Meal",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::NO_CONTENT, description = "Meal deleted"),
        (status_code = StatusCode::NOT_FOUND, description = "No such meal in this restaurant"),
        (status_code = StatusCode::FORBIDDEN, description = "Restaurant belongs to another account"),
    ),
)]
pub(crate) async fn handler(
    restaurant: PathParam<String>,
    id: PathParam<u64>,
    depot: &mut Depot,
) -> Result<StatusCode, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let restaurant_id =
        owner_restaurant_id(depot, state, Some(restaurant.into_inner())).await?;

    state
        .app
        .meals
        .delete_restaurant_meal(&restaurant_id, id.into_inner())
        .await
        .map_err(into_status_error)?;

    Ok(StatusCode::NO_CONTENT)
}
