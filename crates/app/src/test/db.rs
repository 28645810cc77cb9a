//! Postgres test databases in a shared container.

use once_cell::sync::Lazy;
use sqlx::{Connection, PgConnection, PgPool};
use testcontainers::{ContainerAsync, ImageExt, runners::AsyncRunner};
use testcontainers_modules::postgres::Postgres as PostgresImage;
use tokio::sync::OnceCell;

const USER: &str = "forchetta_test";
const PASSWORD: &str = "forchetta_test_password";

/// Shared PostgreSQL container that starts once and is reused across all tests
static POSTGRES_CONTAINER: Lazy<OnceCell<ContainerAsync<PostgresImage>>> = Lazy::new(OnceCell::new);

async fn init_postgres_container() -> ContainerAsync<PostgresImage> {
    PostgresImage::default()
        .with_user(USER)
        .with_password(PASSWORD)
        .with_db_name("forchetta_test")
        .start()
        .await
        .expect("Failed to start PostgreSQL container")
}

/// A freshly migrated database of its own within the shared container.
///
/// Isolation is database-level, so tests never see each other's rows.
#[derive(Debug, Clone)]
pub(crate) struct TestDb {
    pub pool: PgPool,
    pub name: String,
}

impl TestDb {
    pub async fn new() -> Self {
        let container = POSTGRES_CONTAINER
            .get_or_init(init_postgres_container)
            .await;

        let port = container
            .get_host_port_ipv4(5432)
            .await
            .expect("Failed to get container port");

        let host = std::env::var("TESTCONTAINERS_HOST_OVERRIDE")
            .unwrap_or_else(|_| "localhost".to_string());

        let name = format!("forchetta_{}", uuid::Uuid::now_v7().simple());

        let mut conn =
            PgConnection::connect(&format!("postgresql://{USER}:{PASSWORD}@{host}:{port}/postgres"))
                .await
                .expect("Failed to connect to postgres database");

        sqlx::query(&format!("CREATE DATABASE \"{name}\""))
            .execute(&mut conn)
            .await
            .expect("Failed to create test database");

        conn.close()
            .await
            .expect("Failed to close admin connection");

        let pool = PgPool::connect(&format!("postgresql://{USER}:{PASSWORD}@{host}:{port}/{name}"))
            .await
            .expect("Failed to create pool for database");

        crate::database::migrate(&pool)
            .await
            .expect("Failed to run migrations on database");

        Self { pool, name }
    }
}
