//! Auth middleware.
//!
//! With a signing secret configured every gated route needs a valid bearer JWT, and the verified
//! claims are placed in the depot. Opaque tokens prove nothing, so without a secret the gates let
//! requests through and handlers fall back to identifiers supplied in the request.

use std::sync::Arc;

use forchetta_app::{auth::AuthServiceError, domain::users::records::Role};
use salvo::{http::header::AUTHORIZATION, prelude::*};
use tracing::error;

use crate::{extensions::*, state::State};

/// Require a verified session of any role.
#[salvo::handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    let state = match depot.obtain::<Arc<State>>() {
        Ok(state) => Arc::clone(state),
        Err(_error) => {
            res.render(StatusError::internal_server_error());

            return;
        }
    };

    if !state.app.auth.issues_verifiable_tokens() {
        ctrl.call_next(req, depot, res).await;

        return;
    }

    let Some(token) = extract_bearer_token(req) else {
        res.render(StatusError::unauthorized().brief("Missing or invalid Authorization header"));

        return;
    };

    let claims = match state.app.auth.verify_token(token) {
        Ok(claims) => claims,
        Err(AuthServiceError::InvalidCredentials) => {
            res.render(StatusError::unauthorized().brief("Invalid or expired token"));

            return;
        }
        Err(source) => {
            error!("failed to verify session token: {source}");

            res.render(StatusError::internal_server_error());

            return;
        }
    };

    depot.insert_session_claims(claims);

    ctrl.call_next(req, depot, res).await;
}

/// Require the verified session to belong to a restaurant owner. Runs after [`handler`].
#[salvo::handler]
pub(crate) async fn owner(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    if let Some(claims) = depot.session_claims()
        && claims.role != Role::Ristoratore
    {
        res.render(StatusError::forbidden().brief("Restaurant owner account required"));

        return;
    }

    ctrl.call_next(req, depot, res).await;
}

fn extract_bearer_token(req: &Request) -> Option<&str> {
    let value = req.headers().get(AUTHORIZATION)?.to_str().ok()?;
    let mut parts = value.splitn(2, ' ');

    let scheme = parts.next()?;
    let token = parts.next()?.trim();

    if !scheme.eq_ignore_ascii_case("bearer") || token.is_empty() {
        return None;
    }

    Some(token)
}
