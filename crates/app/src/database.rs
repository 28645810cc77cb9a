//! Database connection management

use sqlx::{
    PgPool, Row,
    migrate::MigrateError,
    postgres::{PgPoolOptions, PgRow},
    query,
};

#[derive(Debug, Clone)]
pub struct Db {
    pool: PgPool,
}

impl Db {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Whether the database currently answers a trivial query.
    pub async fn is_reachable(&self) -> bool {
        query("SELECT 1").execute(&self.pool).await.is_ok()
    }
}

/// Connect to `PostgreSQL`.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect(database_url: &str, pool_size: u32) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(pool_size)
        .connect(database_url)
        .await
}

/// Apply pending schema migrations.
///
/// # Errors
///
/// Returns an error when a migration fails to apply.
pub async fn migrate(pool: &PgPool) -> Result<(), MigrateError> {
    sqlx::migrate!("../../migrations").run(pool).await
}

pub(crate) fn id_to_db(id: u64, column: &str) -> Result<i64, sqlx::Error> {
    i64::try_from(id).map_err(|e| sqlx::Error::ColumnDecode {
        index: column.to_string(),
        source: Box::new(e),
    })
}

pub(crate) fn try_get_id(row: &PgRow, column: &str) -> Result<u64, sqlx::Error> {
    let id_i64: i64 = row.try_get(column)?;

    u64::try_from(id_i64).map_err(|e| sqlx::Error::ColumnDecode {
        index: column.to_string(),
        source: Box::new(e),
    })
}
