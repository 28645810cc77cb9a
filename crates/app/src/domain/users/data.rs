//! Users Data

use std::fmt;

use crate::domain::users::records::Role;

/// Registration payload carrying the plain-text password.
#[derive(Clone, PartialEq, Eq)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password: String,
    pub role: Role,
    pub legacy_id: Option<u64>,
}

impl fmt::Debug for NewUser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewUser")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &"**redacted**")
            .field("role", &self.role)
            .field("legacy_id", &self.legacy_id)
            .finish()
    }
}

/// Profile fields an account may change about itself.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileUpdate {
    pub username: Option<String>,
    pub email: Option<String>,
}
