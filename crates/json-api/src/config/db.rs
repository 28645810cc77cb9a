//! Database Config

use std::path::PathBuf;

use clap::Args;

/// Store settings. Without a connection string the server runs on JSON files.
#[derive(Debug, Args)]
pub struct DatabaseConfig {
    /// `PostgreSQL` connection string
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    /// Seconds to wait for `PostgreSQL` before falling back to the file store
    #[arg(long, env = "DATABASE_CONNECT_TIMEOUT_SECONDS", default_value_t = 5)]
    pub connect_timeout_seconds: u64,

    /// Maximum pooled `PostgreSQL` connections
    #[arg(long, env = "DATABASE_POOL_SIZE", default_value_t = 10)]
    pub pool_size: u32,

    /// Directory of the JSON-file store
    #[arg(long, env = "DATA_DIR", default_value = "./data")]
    pub data_dir: PathBuf,
}
