//! List Meals Handler

use std::sync::Arc;

use salvo::prelude::*;

use forchetta_app::domain::meals::data::MealFilter;

use crate::{
    extensions::*,
    meals::{errors::into_status_error, models::MealResponse},
    state::State,
};

/// List Meals Handler
///
/// Filters combine: owning restaurant, dish type, and a case-insensitive search over the name
/// and ingredients.
#[endpoint(
    tags("meals"),
    summary = "List Meals",
    parameters(
        ("restaurantId" = Option<String>, Query, description = "Owning restaurant"),
        ("tipologia" = Option<String>, Query, description = "Dish type"),
        ("search" = Option<String>, Query, description = "Name or ingredient substring"),
    ),
)]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<Vec<MealResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let filter = MealFilter {
        restaurant_id: req.query::<String>("restaurantId"),
        tipologia: req.query::<String>("tipologia"),
        search: req.query::<String>("search"),
    };

    let meals = state
        .app
        .meals
        .list_meals(filter)
        .await
        .map_err(into_status_error)?;

    Ok(Json(meals.into_iter().map(MealResponse::from).collect()))
}
