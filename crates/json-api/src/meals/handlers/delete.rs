//! Delete Meal Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};

use crate::{
    auth::session_restaurant_id, extensions::*, meals::errors::into_status_error, state::State,
};

/// Delete Meal Handler
///
/// With a session only the owner's meals can be deleted; others read as missing.
#[endpoint(
    tags("meals"),
    summary = "Delete Meal",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::NO_CONTENT, description = "Meal deleted"),
        (status_code = StatusCode::NOT_FOUND, description = "Meal not found"),
    ),
)]
pub(crate) async fn handler(
    id: PathParam<u64>,
    depot: &mut Depot,
) -> Result<StatusCode, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let id = id.into_inner();

    let deleted = match session_restaurant_id(depot, state).await? {
        Some(owned) => state.app.meals.delete_restaurant_meal(&owned, id).await,
        None => state.app.meals.delete_meal(id).await,
    };

    deleted.map_err(into_status_error)?;

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use salvo::test::TestClient;
    use testresult::TestResult;

    use forchetta_app::domain::meals::MealsServiceError;

    use crate::test_helpers::{Mocks, owner_service, service};

    use super::*;

    fn route() -> Router {
        Router::with_path("meals/{id}").delete(handler)
    }

    fn make_service(mocks: Mocks) -> Service {
        service(mocks, route())
    }

    #[tokio::test]
    async fn test_delete_returns_204() -> TestResult {
        let mut mocks = Mocks::new();

        mocks
            .meals
            .expect_delete_meal()
            .once()
            .withf(|id| *id == 5)
            .return_once(|_| Ok(()));

        let res = TestClient::delete("http://example.com/meals/5")
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NO_CONTENT));

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_missing_returns_404() -> TestResult {
        let mut mocks = Mocks::new();

        mocks
            .meals
            .expect_delete_meal()
            .once()
            .return_once(|_| Err(MealsServiceError::NotFound));

        let res = TestClient::delete("http://example.com/meals/5")
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }

    #[tokio::test]
    async fn test_owner_delete_is_scoped_to_own_restaurant() -> TestResult {
        let mut mocks = Mocks::new();

        mocks.meals.expect_delete_meal().never();
        mocks
            .meals
            .expect_delete_restaurant_meal()
            .once()
            .withf(|restaurant, id| restaurant == "r_1" && *id == 5)
            .return_once(|_, _| Err(MealsServiceError::NotFound));

        let res = TestClient::delete("http://example.com/meals/5")
            .send(&owner_service(mocks, "r_1", route()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
