//! User Models

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};

use forchetta_app::domain::users::records::UserRecord;

/// Public view of an account; never carries the password hash.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UserResponse {
    pub id: String,
    pub username: String,
    pub email: String,
    pub role: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub restaurant_id: Option<String>,

    pub created_at: String,
}

impl From<UserRecord> for UserResponse {
    fn from(user: UserRecord) -> Self {
        Self {
            id: user.id.to_string(),
            username: user.username,
            email: user.email,
            role: user.role.to_string(),
            restaurant_id: user.restaurant_id,
            created_at: user.created_at.to_string(),
        }
    }
}
