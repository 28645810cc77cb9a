//! Auth Config

use clap::Args;

/// Session token settings.
#[derive(Debug, Args)]
pub struct AuthConfig {
    /// Restaurant id assigned to owner accounts that have none
    #[arg(long, env = "DEFAULT_RESTAURANT_ID")]
    pub default_restaurant_id: Option<String>,

    /// HS256 signing secret; opaque tokens are issued when unset
    #[arg(long, env = "JWT_SECRET", hide_env_values = true)]
    pub jwt_secret: Option<String>,

    /// Signed token lifetime in seconds
    #[arg(long, env = "JWT_EXPIRES_IN", default_value_t = 86_400)]
    pub jwt_expires_in: u64,
}
