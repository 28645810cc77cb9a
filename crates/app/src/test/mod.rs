//! Service test context backed by a throwaway file store.

use std::sync::Arc;

use tempfile::TempDir;

use crate::{
    auth::{AuthService, AuthServiceError},
    context::{AppContext, Repositories},
    domain::{
        meals::MealsService,
        orders::OrdersService,
        restaurants::RestaurantsService,
        users::{
            data::NewUser,
            records::{Role, UserRecord},
        },
    },
    settings::AuthSettings,
    store::{JsonFileStore, StoreBackend, StoreError},
};

#[cfg(feature = "docker-tests")]
mod db;


/// Password given to every account created through [`TestContext::register`].
pub(crate) const TEST_PASSWORD: &str = "segreta";

pub(crate) struct TestContext {
    _dir: TempDir,
    pub repositories: Repositories,
    pub auth: Arc<dyn AuthService>,
    pub meals: Arc<dyn MealsService>,
    pub restaurants: Arc<dyn RestaurantsService>,
    pub orders: Arc<dyn OrdersService>,
}

impl TestContext {
    pub async fn new() -> Result<Self, StoreError> {
        Self::with_auth(AuthSettings::default()).await
    }

    pub async fn with_auth(settings: AuthSettings) -> Result<Self, StoreError> {
        let dir = TempDir::new()?;
        let store = JsonFileStore::open(dir.path()).await?;
        let repositories = Repositories::file(&store);

        let app = AppContext::from_repositories(
            repositories.clone(),
            &settings,
            StoreBackend::File,
            None,
        );

        Ok(Self {
            _dir: dir,
            repositories,
            auth: app.auth,
            meals: app.meals,
            restaurants: app.restaurants,
            orders: app.orders,
        })
    }

    /// Register `username` with an `@example.com` address and [`TEST_PASSWORD`].
    pub async fn register(&self, username: &str, role: Role) -> Result<UserRecord, AuthServiceError> {
        self.auth
            .register(NewUser {
                username: username.to_string(),
                email: format!("{username}@example.com"),
                password: TEST_PASSWORD.to_string(),
                role,
                legacy_id: None,
            })
            .await
    }
}
