//! List Common Meals Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    extensions::*,
    meals::{errors::into_status_error, models::MealResponse},
    state::State,
};

/// List Common Meals Handler
///
/// The shared catalog restaurants can import from.
#[endpoint(tags("meals"), summary = "List Common Meals")]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<Vec<MealResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let meals = state
        .app
        .meals
        .list_common_meals()
        .await
        .map_err(into_status_error)?;

    Ok(Json(meals.into_iter().map(MealResponse::from).collect()))
}
