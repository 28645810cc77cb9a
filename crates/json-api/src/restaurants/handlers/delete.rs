//! Delete Restaurant Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};

use crate::{
    auth::{ensure_same_restaurant, session_restaurant_id},
    extensions::*,
    restaurants::errors::into_status_error,
    state::State,
};

/// Delete Restaurant Handler
///
/// A session may only delete its own restaurant.
#[endpoint(
    tags("restaurants"),
    summary = "Delete Restaurant",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::NO_CONTENT, description = "Restaurant deleted"),
        (status_code = StatusCode::FORBIDDEN, description = "Restaurant belongs to another account"),
        (status_code = StatusCode::NOT_FOUND, description = "Restaurant not found"),
    ),
)]
pub(crate) async fn handler(
    id: PathParam<String>,
    depot: &mut Depot,
) -> Result<StatusCode, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let id = id.into_inner();

    if let Some(owned) = session_restaurant_id(depot, state).await? {
        ensure_same_restaurant(&owned, &id)?;
    }

    state
        .app
        .restaurants
        .delete_restaurant(&id)
        .await
        .map_err(into_status_error)?;

    Ok(StatusCode::NO_CONTENT)
}
