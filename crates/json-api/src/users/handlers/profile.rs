//! Save Profile Handler

use std::sync::Arc;

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use forchetta_app::domain::users::{data::ProfileUpdate, records::UserUuid};

use crate::{
    extensions::*,
    state::State,
    users::{errors::into_status_error, models::UserResponse},
};

/// Profile Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProfileRequest {
    #[serde(default)]
    pub username: Option<String>,

    #[serde(default)]
    pub email: Option<String>,
}

impl From<ProfileRequest> for ProfileUpdate {
    fn from(request: ProfileRequest) -> Self {
        ProfileUpdate {
            username: request.username,
            email: request.email,
        }
    }
}

/// Save Profile Handler
///
/// Owner accounts get their restaurant id filled in when missing.
#[endpoint(
    tags("users"),
    summary = "Save Profile",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Profile saved"),
        (status_code = StatusCode::FORBIDDEN, description = "Another account's profile"),
        (status_code = StatusCode::NOT_FOUND, description = "User not found"),
        (status_code = StatusCode::CONFLICT, description = "Username or email already registered"),
    ),
)]
pub(crate) async fn handler(
    id: PathParam<Uuid>,
    json: JsonBody<ProfileRequest>,
    depot: &mut Depot,
) -> Result<Json<UserResponse>, StatusError> {
    let id = id.into_inner();

    if let Some(claims) = depot.session_claims()
        && claims.sub != id.to_string()
    {
        return Err(StatusError::forbidden().brief("Cannot edit another account"));
    }

    let state = depot.obtain_or_500::<Arc<State>>()?;

    let user = state
        .app
        .auth
        .save_profile(UserUuid::from_uuid(id), json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(user.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use forchetta_app::domain::users::records::Role;

    use crate::{
        test_helpers::{Mocks, TEST_OWNER_UUID, owner_service, service},
        users::models::tests::make_user,
    };

    use super::*;

    fn route() -> Router {
        Router::with_path("users/{id}").put(handler)
    }

    #[tokio::test]
    async fn test_profile_save_returns_derived_restaurant_id() -> TestResult {
        let user = make_user("chef", Role::Ristoratore);
        let id = user.id;
        let mut mocks = Mocks::new();

        mocks
            .auth
            .expect_save_profile()
            .once()
            .withf(move |user, update| {
                *user == id && update.email.as_deref() == Some("nuovo@example.com")
            })
            .return_once(move |_, _| Ok(user));

        let mut res = TestClient::put(format!("http://example.com/users/{id}"))
            .json(&json!({ "email": "nuovo@example.com" }))
            .send(&service(mocks, route()))
            .await;

        let body: UserResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.restaurant_id.as_deref(), Some("r_42"));

        Ok(())
    }

    #[tokio::test]
    async fn test_other_account_is_forbidden() -> TestResult {
        let mut mocks = Mocks::new();

        mocks.auth.expect_save_profile().never();

        let other = Uuid::nil();

        assert_ne!(other.to_string(), TEST_OWNER_UUID);

        let res = TestClient::put(format!("http://example.com/users/{other}"))
            .json(&json!({ "username": "x" }))
            .send(&owner_service(mocks, "r_1", route()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::FORBIDDEN));

        Ok(())
    }
}
