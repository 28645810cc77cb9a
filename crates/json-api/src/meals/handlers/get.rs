//! Get Meal Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};

use crate::{
    extensions::*,
    meals::{errors::into_status_error, models::MealResponse},
    state::State,
};

/// Get Meal Handler
#[endpoint(tags("meals"), summary = "Get Meal")]
pub(crate) async fn handler(
    id: PathParam<u64>,
    depot: &mut Depot,
) -> Result<Json<MealResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let meal = state
        .app
        .meals
        .get_meal(id.into_inner())
        .await
        .map_err(into_status_error)?;

    Ok(Json(meal.into()))
}
