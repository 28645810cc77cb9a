//! Test helpers.

use std::sync::Arc;

use forchetta_app::{
    auth::{MockAuthService, SessionClaims},
    context::AppContext,
    domain::{
        meals::MockMealsService, orders::MockOrdersService, restaurants::MockRestaurantsService,
        users::records::Role,
    },
    store::StoreBackend,
};
use salvo::{affix_state::inject, prelude::*};

use crate::{extensions::*, state::State};

pub(crate) const TEST_OWNER_UUID: &str = "0190a5b4-7c1e-7000-8000-000000000001";

pub(crate) fn make_claims(restaurant_id: &str) -> SessionClaims {
    SessionClaims {
        sub: TEST_OWNER_UUID.to_string(),
        role: Role::Ristoratore,
        restaurant_id: Some(restaurant_id.to_string()),
        iat: 0,
        exp: i64::MAX,
    }
}

/// Mocks for every service; tests replace the one they exercise.
pub(crate) struct Mocks {
    pub auth: MockAuthService,
    pub meals: MockMealsService,
    pub restaurants: MockRestaurantsService,
    pub orders: MockOrdersService,
}

impl Mocks {
    /// Mocks with no expectations, so any call fails the test.
    pub(crate) fn new() -> Self {
        Self {
            auth: MockAuthService::new(),
            meals: MockMealsService::new(),
            restaurants: MockRestaurantsService::new(),
            orders: MockOrdersService::new(),
        }
    }

    pub(crate) fn into_state(self) -> Arc<State> {
        State::from_app_context(AppContext {
            auth: Arc::new(self.auth),
            meals: Arc::new(self.meals),
            restaurants: Arc::new(self.restaurants),
            orders: Arc::new(self.orders),
            backend: StoreBackend::File,
            db: None,
        })
    }
}

pub(crate) fn state_with_auth(auth: MockAuthService) -> Arc<State> {
    Mocks {
        auth,
        ..Mocks::new()
    }
    .into_state()
}

/// Route behind the state injector, without any auth gate.
pub(crate) fn service(mocks: Mocks, route: Router) -> Service {
    Service::new(Router::new().hoop(inject(mocks.into_state())).push(route))
}

/// Route behind the state injector, acting as a verified owner of `restaurant_id`.
pub(crate) fn owner_service(mocks: Mocks, restaurant_id: &str, route: Router) -> Service {
    let claims = make_claims(restaurant_id);

    Service::new(
        Router::new()
            .hoop(inject(mocks.into_state()))
            .hoop(InjectClaims(claims))
            .push(route),
    )
}

struct InjectClaims(SessionClaims);

#[async_trait]
impl Handler for InjectClaims {
    async fn handle(
        &self,
        req: &mut Request,
        depot: &mut Depot,
        res: &mut Response,
        ctrl: &mut FlowCtrl,
    ) {
        depot.insert_session_claims(self.0.clone());
        ctrl.call_next(req, depot, res).await;
    }
}
