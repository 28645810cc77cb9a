//! List Restaurants Handler

use std::sync::Arc;

use salvo::{oapi::extract::QueryParam, prelude::*};

use forchetta_app::domain::restaurants::data::RestaurantFilter;

use crate::{
    extensions::*,
    restaurants::{errors::into_status_error, models::RestaurantResponse},
    state::State,
};

/// List Restaurants Handler
///
/// `nome` and `luogo` match case-insensitive substrings.
#[endpoint(tags("restaurants"), summary = "List Restaurants")]
pub(crate) async fn handler(
    nome: QueryParam<String, false>,
    luogo: QueryParam<String, false>,
    depot: &mut Depot,
) -> Result<Json<Vec<RestaurantResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let filter = RestaurantFilter {
        nome: nome.into_inner(),
        luogo: luogo.into_inner(),
    };

    let restaurants = state
        .app
        .restaurants
        .list_restaurants(filter)
        .await
        .map_err(into_status_error)?;

    Ok(Json(
        restaurants
            .into_iter()
            .map(RestaurantResponse::from)
            .collect(),
    ))
}
