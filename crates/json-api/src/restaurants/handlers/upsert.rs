//! Upsert Owner Restaurant Handler

use std::sync::Arc;

use salvo::{oapi::extract::JsonBody, prelude::*};
use serde_json::Value;

use crate::{
    auth::owner_restaurant_id,
    extensions::*,
    restaurants::{
        errors::into_status_error,
        models::{RestaurantResponse, details_from_json},
    },
    state::State,
};

/// Upsert Owner Restaurant Handler
///
/// Saves the profile of the restaurant the caller owns, creating it on first save.
#[endpoint(
    tags("restaurants"),
    summary = "Save Owner Restaurant",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Restaurant saved"),
        (status_code = StatusCode::BAD_REQUEST, description = "Missing name on first save"),
        (status_code = StatusCode::FORBIDDEN, description = "Restaurant belongs to another account"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<Value>,
    depot: &mut Depot,
) -> Result<Json<RestaurantResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let mut details = details_from_json(json.into_inner())?;

    let restaurant_id = owner_restaurant_id(depot, state, details.restaurant_id.take()).await?;

    let restaurant = state
        .app
        .restaurants
        .upsert_restaurant(&restaurant_id, details)
        .await
        .map_err(into_status_error)?;

    Ok(Json(restaurant.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::TestClient;
    use serde_json::json;
    use testresult::TestResult;

    use crate::{
        restaurants::models::tests::make_restaurant,
        test_helpers::{Mocks, owner_service, service},
    };

    use super::*;

    fn route() -> Router {
        Router::with_path("restaurant").put(handler)
    }

    #[tokio::test]
    async fn test_owner_saves_derived_restaurant() -> TestResult {
        let mut mocks = Mocks::new();

        mocks
            .restaurants
            .expect_upsert_restaurant()
            .once()
            .withf(|id, details| id == "r_42" && details.restaurant_id.is_none())
            .return_once(|_, _| Ok(make_restaurant("r_42")));

        let res = TestClient::put("http://example.com/restaurant")
            .json(&json!({ "nome": "Da Mario" }))
            .send(&owner_service(mocks, "r_42", route()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn test_opaque_mode_without_id_returns_400() -> TestResult {
        let mut mocks = Mocks::new();

        mocks.restaurants.expect_upsert_restaurant().never();

        let res = TestClient::put("http://example.com/restaurant")
            .json(&json!({ "nome": "Da Mario" }))
            .send(&service(mocks, route()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
