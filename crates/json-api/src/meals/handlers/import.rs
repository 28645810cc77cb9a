//! Import Common Meal Handler

use std::sync::Arc;

use salvo::{http::header::LOCATION, oapi::extract::PathParam, prelude::*};

use crate::{
    auth::owner_restaurant_id,
    extensions::*,
    meals::{errors::into_status_error, models::MealResponse},
    state::State,
};

/// Import Common Meal Handler
///
/// Copies a common dish into the owner's menu under a new id. The copy does not follow later
/// changes to the common dish.
#[endpoint(
    tags("meals"),
    summary = "Import Common Meal",
    security(("bearer_auth" = [])),
    parameters(
        ("restaurantId" = Option<String>, Query, description = "Target restaurant when tokens are opaque"),
    ),
    responses(
        (status_code = StatusCode::CREATED, description = "Meal imported"),
        (status_code = StatusCode::NOT_FOUND, description = "No such common meal"),
        (status_code = StatusCode::BAD_REQUEST, description = "Target restaurant missing"),
    ),
)]
pub(crate) async fn handler(
    id: PathParam<u64>,
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<MealResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let restaurant_id =
        owner_restaurant_id(depot, state, req.query::<String>("restaurantId")).await?;

    let meal = state
        .app
        .meals
        .import_common_meal(&restaurant_id, id.into_inner())
        .await
        .map_err(into_status_error)?;

    res.add_header(LOCATION, format!("/meals/{}", meal.idmeals), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(meal.into()))
}
