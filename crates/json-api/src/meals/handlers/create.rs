//! Create Meal Handler

use std::sync::Arc;

use salvo::{http::header::LOCATION, oapi::extract::JsonBody, prelude::*};
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

/// Create Meal Handler
///
/// `prezzo` may be a number or a numeric string. Ingredients come from `ingredienti` or from
/// numbered `ingrediente1..20` fields. With a session the meal always lands in the owner's
/// restaurant.
#[endpoint(
    tags("meals"),
    summary = "Create Meal",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Meal created"),
        (status_code = StatusCode::BAD_REQUEST, description = "Missing or invalid fields"),
        (status_code = StatusCode::FORBIDDEN, description = "Restaurant belongs to another account"),
        (status_code = StatusCode::CONFLICT, description = "Meal id assignment kept colliding"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<Value>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<MealResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let mut input = MealInput::from_json(&json.into_inner()).map_err(invalid_payload)?;

    if let Some(owned) = session_restaurant_id(depot, state).await? {
        if let Some(requested) = &input.restaurant_id {
            ensure_same_restaurant(&owned, requested)?;
        }

        input.restaurant_id = Some(owned);
    }

    let meal = state
        .app
        .meals
        .create_meal(input)
        .await
        .map_err(into_status_error)?;

    res.add_header(LOCATION, format!("/meals/{}", meal.idmeals), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    tracing::info!(idmeals = meal.idmeals, restaurant = %meal.restaurant_id, "created meal");

    Ok(Json(meal.into()))
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use forchetta_app::domain::meals::MealsServiceError;

    use crate::{
        meals::models::tests::make_meal,
        test_helpers::{Mocks, owner_service, service},
    };

    use super::*;

    fn route() -> Router {
        Router::with_path("meals").post(handler)
    }

    fn make_service(mocks: Mocks) -> Service {
        service(mocks, route())
    }

    #[tokio::test]
    async fn test_create_normalises_payload() -> TestResult {
        let mut mocks = Mocks::new();

        mocks
            .meals
            .expect_create_meal()
            .once()
            .withf(|input| {
                input.prezzo == Some(Decimal::new(950, 2))
                    && input.ingredienti
                        == Some(vec!["Pomodoro".to_string(), "Mozzarella".to_string()])
            })
            .return_once(|_| Ok(make_meal(12, "r_1")));

        let mut res = TestClient::post("http://example.com/meals")
            .json(&json!({
                "restaurantId": "r_1",
                "nome": "Margherita",
                "prezzo": " 9.50 ",
                "ingrediente1": "Pomodoro",
                "ingrediente2": "Mozzarella"
            }))
            .send(&make_service(mocks))
            .await;

        let body: MealResponse = res.take_json().await?;
        let location = res.headers().get("location").and_then(|v| v.to_str().ok());

        assert_eq!(res.status_code, Some(StatusCode::CREATED));
        assert_eq!(location, Some("/meals/12"));
        assert_eq!(body.idmeals, 12);

        Ok(())
    }

    #[tokio::test]
    async fn test_create_with_decimal_comma_returns_400() -> TestResult {
        let mut mocks = Mocks::new();

        mocks.meals.expect_create_meal().never();

        let res = TestClient::post("http://example.com/meals")
            .json(&json!({ "restaurantId": "r_1", "nome": "Margherita", "prezzo": "9,50" }))
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_missing_fields_returns_400() -> TestResult {
        let mut mocks = Mocks::new();

        mocks
            .meals
            .expect_create_meal()
            .once()
            .return_once(|_| Err(MealsServiceError::Validation("nome is required".to_string())));

        let res = TestClient::post("http://example.com/meals")
            .json(&json!({ "restaurantId": "r_1", "prezzo": 4 }))
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_owner_meal_lands_in_own_restaurant() -> TestResult {
        let mut mocks = Mocks::new();

        mocks
            .meals
            .expect_create_meal()
            .once()
            .withf(|input| input.restaurant_id.as_deref() == Some("r_1"))
            .return_once(|_| Ok(make_meal(12, "r_1")));

        let res = TestClient::post("http://example.com/meals")
            .json(&json!({ "nome": "Margherita", "prezzo": 8 }))
            .send(&owner_service(mocks, "r_1", route()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CREATED));

        Ok(())
    }

    #[tokio::test]
    async fn test_owner_creating_for_another_restaurant_returns_403() -> TestResult {
        let mut mocks = Mocks::new();

        mocks.meals.expect_create_meal().never();

        let res = TestClient::post("http://example.com/meals")
            .json(&json!({ "restaurantId": "r_2", "nome": "Margherita", "prezzo": 8 }))
            .send(&owner_service(mocks, "r_1", route()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::FORBIDDEN));

        Ok(())
    }
}
