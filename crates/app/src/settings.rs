//! Application settings consumed by [`crate::context::AppContext`].

use std::{path::PathBuf, time::Duration};

/// Default lifetime of signed session tokens.
pub const DEFAULT_TOKEN_LIFETIME: Duration = Duration::from_secs(24 * 60 * 60);

#[derive(Debug, Clone, Default)]
pub struct AppSettings {
    pub store: StoreSettings,
    pub auth: AuthSettings,
}

/// Where records are persisted.
#[derive(Debug, Clone)]
pub struct StoreSettings {
    /// Postgres connection string; `None` runs on the file store.
    pub database_url: Option<String>,

    /// Upper bound on the initial connection attempt before degrading to the file store.
    pub connect_timeout: Duration,

    /// Maximum pooled Postgres connections.
    pub pool_size: u32,

    /// Directory of the JSON-file fallback store.
    pub data_dir: PathBuf,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            database_url: None,
            connect_timeout: Duration::from_secs(5),
            pool_size: 10,
            data_dir: PathBuf::from("data"),
        }
    }
}

/// Identity and token settings.
#[derive(Clone)]
pub struct AuthSettings {
    /// Restaurant identifier handed to owner accounts that have none of their own.
    pub default_restaurant_id: Option<String>,

    /// HS256 secret; without one the server issues opaque tokens.
    pub jwt_secret: Option<String>,

    pub jwt_expires_in: Duration,
}

impl Default for AuthSettings {
    fn default() -> Self {
        Self {
            default_restaurant_id: None,
            jwt_secret: None,
            jwt_expires_in: DEFAULT_TOKEN_LIFETIME,
        }
    }
}

impl std::fmt::Debug for AuthSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthSettings")
            .field("default_restaurant_id", &self.default_restaurant_id)
            .field("jwt_secret", &self.jwt_secret.as_ref().map(|_| "**redacted**"))
            .field("jwt_expires_in", &self.jwt_expires_in)
            .finish()
    }
}
