//! Update Meal Handler

use std::sync::Arc;

use salvo::{
    oapi::extract::{JsonBody, PathParam},
    prelude::*,
};
use serde_json::Value;

use forchetta_app::domain::meals::data::MealInput;

use crate::{
    auth::{ensure_same_restaurant, session_restaurant_id},
    extensions::*,
    meals::{
        errors::{into_status_error, invalid_payload},
        models::MealResponse,
    },
    state::State,
};

/// Update Meal Handler
///
/// Merges the supplied fields. The id cannot change. With a session only meals of the owner's
/// restaurant can be changed, and they stay there.
#[endpoint(
    tags("meals"),
    summary = "Update Meal",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Meal updated"),
        (status_code = StatusCode::NOT_FOUND, description = "Meal not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid fields or id change"),
        (status_code = StatusCode::FORBIDDEN, description = "Meal belongs to another restaurant"),
    ),
)]
#[tracing::instrument(name = "meals.update", skip_all, err)]
pub(crate) async fn handler(
    id: PathParam<u64>,
    json: JsonBody<Value>,
    depot: &mut Depot,
) -> Result<Json<MealResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let id = id.into_inner();
    let input = MealInput::from_json(&json.into_inner()).map_err(invalid_payload)?;

    if let Some(owned) = session_restaurant_id(depot, state).await? {
        let current = state
            .app
            .meals
            .get_meal(id)
            .await
            .map_err(into_status_error)?;

        ensure_same_restaurant(&owned, &current.restaurant_id)?;

        if let Some(requested) = &input.restaurant_id {
            ensure_same_restaurant(&owned, requested)?;
        }
    }

    let meal = state
        .app
        .meals
        .update_meal(id, input)
        .await
        .map_err(into_status_error)?;

    Ok(Json(meal.into()))
}
