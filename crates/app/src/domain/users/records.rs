//! User Records

use std::{fmt, str::FromStr};

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::uuids::TypedUuid;

/// User UUID
pub type UserUuid = TypedUuid<UserRecord>;

/// Account role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Customer placing orders.
    Cliente,

    /// Restaurant owner managing a menu and its orders.
    Ristoratore,
}

impl Role {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Cliente => "cliente",
            Self::Ristoratore => "ristoratore",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown role `{0}`")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "cliente" => Ok(Self::Cliente),
            "ristoratore" => Ok(Self::Ristoratore),
            _ => Err(UnknownRole(value.to_string())),
        }
    }
}

/// User Record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub id: UserUuid,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub restaurant_id: Option<String>,

    /// Numeric identifier carried over from accounts created before UUIDs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub legacy_id: Option<u64>,

    pub created_at: Timestamp,
}

impl UserRecord {
    /// Whether `identifier` names this account by email or username, ignoring case.
    #[must_use]
    pub fn is_identified_by(&self, identifier: &str) -> bool {
        let identifier = identifier.trim();

        self.email.eq_ignore_ascii_case(identifier) || self.username.eq_ignore_ascii_case(identifier)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_parses_case_insensitively() {
        assert_eq!("Ristoratore".parse::<Role>(), Ok(Role::Ristoratore));
        assert_eq!(" cliente ".parse::<Role>(), Ok(Role::Cliente));
        assert!("admin".parse::<Role>().is_err());
    }

    #[test]
    fn identifier_matches_email_or_username() {
        let user = UserRecord {
            id: UserUuid::new(),
            username: "Mario".to_string(),
            email: "mario@example.com".to_string(),
            password_hash: String::new(),
            role: Role::Cliente,
            restaurant_id: None,
            legacy_id: None,
            created_at: Timestamp::UNIX_EPOCH,
        };

        assert!(user.is_identified_by("MARIO"));
        assert!(user.is_identified_by("Mario@Example.com"));
        assert!(!user.is_identified_by("luigi"));
    }
}
