//! Forchetta JSON API Healthcheck Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use crate::{extensions::*, state::State};

/// Healthcheck response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    /// Service status
    pub status: String,

    /// Active store backend (`postgres` or `file`)
    pub store: String,

    /// Whether the database answers right now
    pub store_connected: bool,
}

/// Healthcheck handler
///
/// Reports the active store and whether it is reachable. Always `ok` while the process serves.
#[endpoint(tags("health"), summary = "Health check endpoint")]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<HealthResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        store: state.app.backend.as_str().to_string(),
        store_connected: state.app.store_connected().await,
    }))
}
