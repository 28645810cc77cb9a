//! Server configuration module

use std::time::Duration;

use clap::Parser;
use forchetta_app::settings::{AppSettings, AuthSettings, StoreSettings};

use crate::config::{
    auth::AuthConfig, db::DatabaseConfig, logging::LoggingConfig, server::ServerRuntimeConfig,
};

pub(crate) mod auth;
pub(crate) mod db;
pub(crate) mod logging;
pub(crate) mod server;

/// Forchetta JSON API Server configuration
#[derive(Debug, Parser)]
#[command(name = "forchetta-json", about = "Forchetta JSON API Server", long_about = None)]
pub struct ServerConfig {
    /// Server network settings.
    #[command(flatten)]
    pub server: ServerRuntimeConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// Store settings.
    #[command(flatten)]
    pub database: DatabaseConfig,

    /// Session token settings.
    #[command(flatten)]
    pub auth: AuthConfig,
}

impl ServerConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }

    /// Get the socket address for binding
    #[must_use]
    pub fn socket_addr(&self) -> String {
        self.server.socket_addr()
    }

    /// Settings handed to the application context.
    #[must_use]
    pub fn app_settings(&self) -> AppSettings {
        AppSettings {
            store: StoreSettings {
                database_url: self
                    .database
                    .database_url
                    .clone()
                    .filter(|url| !url.trim().is_empty()),
                connect_timeout: Duration::from_secs(self.database.connect_timeout_seconds),
                pool_size: self.database.pool_size,
                data_dir: self.database.data_dir.clone(),
            },
            auth: AuthSettings {
                default_restaurant_id: self.auth.default_restaurant_id.clone(),
                jwt_secret: self.auth.jwt_secret.clone(),
                jwt_expires_in: Duration::from_secs(self.auth.jwt_expires_in),
            },
        }
    }
}
