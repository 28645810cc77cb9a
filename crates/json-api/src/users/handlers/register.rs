//! Register User Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use forchetta_app::domain::users::{data::NewUser, records::Role};

use crate::{
    extensions::*,
    state::State,
    users::{errors::into_status_error, models::UserResponse},
};

/// Register Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,

    /// `cliente` (default) or `ristoratore`
    #[serde(default)]
    pub role: Option<String>,

    /// Numeric id carried over from an older account store
    #[serde(default)]
    pub legacy_id: Option<u64>,
}

impl TryFrom<RegisterRequest> for NewUser {
    type Error = StatusError;

    fn try_from(request: RegisterRequest) -> Result<Self, Self::Error> {
        let role = request
            .role
            .as_deref()
            .map_or(Ok(Role::Cliente), str::parse::<Role>)
            .or_400("invalid role")?;

        Ok(NewUser {
            username: request.username,
            email: request.email,
            password: request.password,
            role,
            legacy_id: request.legacy_id,
        })
    }
}

/// Register Handler
#[endpoint(
    tags("users"),
    summary = "Register User",
    responses(
        (status_code = StatusCode::CREATED, description = "User registered"),
        (status_code = StatusCode::CONFLICT, description = "Username or email already registered"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<RegisterRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<UserResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let user = state
        .app
        .auth
        .register(json.into_inner().try_into()?)
        .await
        .map_err(into_status_error)?;

    tracing::info!(user = %user.id, role = %user.role, "registered user");

    res.status_code(StatusCode::CREATED);

    Ok(Json(user.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use forchetta_app::auth::AuthServiceError;

    use crate::{
        test_helpers::{Mocks, service},
        users::models::tests::make_user,
    };

    use super::*;

    fn make_service(mocks: Mocks) -> Service {
        service(mocks, Router::with_path("users/register").post(handler))
    }

    #[tokio::test]
    async fn test_register_owner_returns_201_with_restaurant_id() -> TestResult {
        let user = make_user("chef", Role::Ristoratore);
        let mut mocks = Mocks::new();

        mocks
            .auth
            .expect_register()
            .once()
            .withf(|new| {
                new.username == "chef" && new.role == Role::Ristoratore && new.legacy_id == Some(42)
            })
            .return_once(move |_| Ok(user));

        let mut res = TestClient::post("http://example.com/users/register")
            .json(&json!({
                "username": "chef",
                "email": "chef@example.com",
                "password": "segreta",
                "role": "Ristoratore",
                "legacyId": 42
            }))
            .send(&make_service(mocks))
            .await;

        let body: UserResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::CREATED));
        assert_eq!(body.role, "ristoratore");
        assert_eq!(body.restaurant_id.as_deref(), Some("r_42"));

        Ok(())
    }

    #[tokio::test]
    async fn test_register_defaults_to_customer() -> TestResult {
        let user = make_user("mario", Role::Cliente);
        let mut mocks = Mocks::new();

        mocks
            .auth
            .expect_register()
            .once()
            .withf(|new| new.role == Role::Cliente)
            .return_once(move |_| Ok(user));

        let res = TestClient::post("http://example.com/users/register")
            .json(&json!({ "username": "mario", "email": "mario@example.com", "password": "x" }))
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CREATED));

        Ok(())
    }

    #[tokio::test]
    async fn test_register_unknown_role_returns_400() -> TestResult {
        let mut mocks = Mocks::new();

        mocks.auth.expect_register().never();

        let res = TestClient::post("http://example.com/users/register")
            .json(&json!({
                "username": "mario",
                "email": "mario@example.com",
                "password": "x",
                "role": "admin"
            }))
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_register_duplicate_returns_409() -> TestResult {
        let mut mocks = Mocks::new();

        mocks
            .auth
            .expect_register()
            .once()
            .return_once(|_| Err(AuthServiceError::Conflict));

        let res = TestClient::post("http://example.com/users/register")
            .json(&json!({ "username": "mario", "email": "mario@example.com", "password": "x" }))
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CONFLICT));

        Ok(())
    }
}
