//! Depot helper extensions.

use std::any::Any;

use forchetta_app::auth::SessionClaims;
use salvo::prelude::{Depot, StatusError};

const SESSION_CLAIMS_DEPOT_KEY: &str = "session_claims";

/// Helpers for mapping depot extraction failures to HTTP errors.
pub(crate) trait DepotExt {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError>;

    fn insert_session_claims(&mut self, claims: SessionClaims);

    /// Claims of a verified bearer token, absent when tokens are opaque.
    fn session_claims(&self) -> Option<&SessionClaims>;
}

impl DepotExt for Depot {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError> {
        self.obtain::<T>()
            .map_err(|_ignored| StatusError::internal_server_error())
    }

    fn insert_session_claims(&mut self, claims: SessionClaims) {
        self.insert(SESSION_CLAIMS_DEPOT_KEY, claims);
    }

    fn session_claims(&self) -> Option<&SessionClaims> {
        self.get::<SessionClaims>(SESSION_CLAIMS_DEPOT_KEY).ok()
    }
}
