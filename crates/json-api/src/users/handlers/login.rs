//! Login Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use forchetta_app::auth::{Session, TokenType};

use crate::{
    extensions::*,
    state::State,
    users::{errors::into_status_error, models::UserResponse},
};

/// Login Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct LoginRequest {
    /// Email or username, matched case-insensitively
    #[serde(alias = "email", alias = "username")]
    pub identifier: String,

    pub password: String,
}

/// Login Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct LoginResponse {
    pub token: String,

    /// `jwt` or `opaque`
    pub token_type: String,

    pub user: UserResponse,
}

impl From<Session> for LoginResponse {
    fn from(session: Session) -> Self {
        let token_type = match session.token_type {
            TokenType::Jwt => "jwt",
            TokenType::Opaque => "opaque",
        };

        Self {
            token: session.token,
            token_type: token_type.to_string(),
            user: session.user.into(),
        }
    }
}

/// Login Handler
///
/// Served on both `/login` and `/users/login`.
#[endpoint(
    tags("users"),
    summary = "Login",
    responses(
        (status_code = StatusCode::OK, description = "Session issued"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Invalid credentials"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<LoginRequest>,
    depot: &mut Depot,
) -> Result<Json<LoginResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let request = json.into_inner();

    let session = state
        .app
        .auth
        .authenticate(&request.identifier, &request.password)
        .await
        .map_err(into_status_error)?;

    Ok(Json(session.into()))
}
