//! App Context

use std::sync::Arc;

use sqlx::{PgPool, migrate::MigrateError};
use thiserror::Error;
use tokio::time::timeout;
use tracing::{info, warn};

use crate::{
    auth::{AuthService, Argon2PasswordHasher, StoreAuthService},
    database::{self, Db},
    domain::{
        meals::{
            MealsService, StoreMealsService,
            repositories::{FileMealsRepository, MealsRepository, PgMealsRepository},
        },
        orders::{
            OrdersService, StoreOrdersService,
            repositories::{FileOrdersRepository, OrdersRepository, PgOrdersRepository},
        },
        restaurants::{
            RestaurantsService, StoreRestaurantsService,
            repositories::{
                FileRestaurantsRepository, PgRestaurantsRepository, RestaurantsRepository,
            },
        },
        users::repositories::{FileUsersRepository, PgUsersRepository, UsersRepository},
    },
    settings::{AppSettings, AuthSettings},
    store::{JsonFileStore, StoreBackend, StoreError},
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to open data directory")]
    DataDir(#[source] StoreError),

    #[error("failed to apply database migrations")]
    Migration(#[source] MigrateError),
}

/// One repository per collection, all on the same backend.
#[derive(Clone)]
pub struct Repositories {
    pub users: Arc<dyn UsersRepository>,
    pub meals: Arc<dyn MealsRepository>,
    pub restaurants: Arc<dyn RestaurantsRepository>,
    pub orders: Arc<dyn OrdersRepository>,
}

impl Repositories {
    #[must_use]
    pub fn postgres(pool: &PgPool) -> Self {
        Self {
            users: Arc::new(PgUsersRepository::new(pool.clone())),
            meals: Arc::new(PgMealsRepository::new(pool.clone())),
            restaurants: Arc::new(PgRestaurantsRepository::new(pool.clone())),
            orders: Arc::new(PgOrdersRepository::new(pool.clone())),
        }
    }

    #[must_use]
    pub fn file(store: &JsonFileStore) -> Self {
        Self {
            users: Arc::new(FileUsersRepository::new(store)),
            meals: Arc::new(FileMealsRepository::new(store)),
            restaurants: Arc::new(FileRestaurantsRepository::new(store)),
            orders: Arc::new(FileOrdersRepository::new(store)),
        }
    }
}

#[derive(Clone)]
pub struct AppContext {
    pub auth: Arc<dyn AuthService>,
    pub meals: Arc<dyn MealsService>,
    pub restaurants: Arc<dyn RestaurantsService>,
    pub orders: Arc<dyn OrdersService>,
    pub backend: StoreBackend,
    pub db: Option<Db>,
}

impl AppContext {
    /// Build the application context on Postgres when reachable, on the file store otherwise.
    ///
    /// The Postgres connection attempt is bounded by the configured timeout. A missing URL, a
    /// connection error or a timeout all degrade to the file store with a warning.
    ///
    /// # Errors
    ///
    /// Returns an error when migrations fail on a reachable database, or when the file store
    /// directory cannot be created.
    pub async fn connect(settings: &AppSettings) -> Result<Self, AppInitError> {
        if let Some(pool) = Self::connect_postgres(settings).await {
            database::migrate(&pool)
                .await
                .map_err(AppInitError::Migration)?;

            info!("using postgres store");

            return Ok(Self::from_repositories(
                Repositories::postgres(&pool),
                &settings.auth,
                StoreBackend::Postgres,
                Some(Db::new(pool)),
            ));
        }

        let store = JsonFileStore::open(&settings.store.data_dir)
            .await
            .map_err(AppInitError::DataDir)?;

        info!(data_dir = %store.dir().display(), "using file store");

        Ok(Self::from_repositories(
            Repositories::file(&store),
            &settings.auth,
            StoreBackend::File,
            None,
        ))
    }

    async fn connect_postgres(settings: &AppSettings) -> Option<PgPool> {
        let url = settings.store.database_url.as_deref()?;
        let connect_timeout = settings.store.connect_timeout;

        match timeout(
            connect_timeout,
            database::connect(url, settings.store.pool_size),
        )
        .await
        {
            Ok(Ok(pool)) => Some(pool),
            Ok(Err(error)) => {
                warn!(error = %error, "postgres unavailable, falling back to file store");
                None
            }
            Err(_) => {
                warn!(
                    timeout_secs = connect_timeout.as_secs(),
                    "postgres connection timed out, falling back to file store"
                );
                None
            }
        }
    }

    /// Wire services over an existing set of repositories.
    #[must_use]
    pub fn from_repositories(
        repositories: Repositories,
        auth: &AuthSettings,
        backend: StoreBackend,
        db: Option<Db>,
    ) -> Self {
        Self {
            auth: Arc::new(StoreAuthService::new(
                repositories.users,
                Arc::new(Argon2PasswordHasher),
                auth,
            )),
            meals: Arc::new(StoreMealsService::new(Arc::clone(&repositories.meals))),
            restaurants: Arc::new(StoreRestaurantsService::new(repositories.restaurants)),
            orders: Arc::new(StoreOrdersService::new(
                repositories.orders,
                repositories.meals,
            )),
            backend,
            db,
        }
    }

    /// Whether the backing database answers right now. Always `false` on the file store.
    pub async fn store_connected(&self) -> bool {
        match &self.db {
            Some(db) => db.is_reachable().await,
            None => false,
        }
    }
}
