//! Restaurant an owner request acts for.

use forchetta_app::{auth::AuthServiceError, domain::users::records::UserUuid};
use salvo::prelude::{Depot, StatusError};
use tracing::error;

use crate::{extensions::*, state::State};

/// Restaurant id for an owner-scoped request.
///
/// A verified session decides the id: its claim, or a fresh derivation for the account. A
/// `requested` id naming another restaurant is then forbidden. Without a session the request must
/// name the restaurant itself.
pub(crate) async fn owner_restaurant_id(
    depot: &Depot,
    state: &State,
    requested: Option<String>,
) -> Result<String, StatusError> {
    let requested = requested
        .map(|id| id.trim().to_string())
        .filter(|id| !id.is_empty());

    let Some(owned) = session_restaurant_id(depot, state).await? else {
        return requested.ok_or_else(|| StatusError::bad_request().brief("restaurantId is required"));
    };

    if let Some(requested) = &requested {
        ensure_same_restaurant(&owned, requested)?;
    }

    Ok(owned)
}

/// Restaurant the verified session acts for, or `None` when the request carries no session.
pub(crate) async fn session_restaurant_id(
    depot: &Depot,
    state: &State,
) -> Result<Option<String>, StatusError> {
    let Some(claims) = depot.session_claims() else {
        return Ok(None);
    };

    if let Some(id) = claims.restaurant_id.clone().filter(|id| !id.is_empty()) {
        return Ok(Some(id));
    }

    let user = claims
        .sub
        .parse::<UserUuid>()
        .map_err(|_ignored| StatusError::unauthorized().brief("Invalid token subject"))?;

    state
        .app
        .auth
        .resolve_restaurant_id(user)
        .await
        .map(Some)
        .map_err(|error| match error {
            AuthServiceError::NotFound => StatusError::unauthorized().brief("Unknown account"),
            AuthServiceError::NotRestaurantOwner => {
                StatusError::forbidden().brief("Restaurant owner account required")
            }
            error => {
                error!("failed to resolve restaurant id: {error}");

                StatusError::internal_server_error()
            }
        })
}

/// Forbid acting on `requested` when the session owns another restaurant.
pub(crate) fn ensure_same_restaurant(owned: &str, requested: &str) -> Result<(), StatusError> {
    if requested.trim() == owned {
        Ok(())
    } else {
        Err(StatusError::forbidden().brief("Restaurant belongs to another account"))
    }
}
