//! Forchetta JSON API Server

use std::process;

use salvo::{
    affix_state::inject,
    oapi::{
        OpenApi,
        security::{Http, HttpAuthScheme, SecurityScheme},
        swagger_ui::SwaggerUi,
    },
    prelude::*,
    trailing_slash::remove_slash,
};
use tracing::{error, info};

use forchetta_app::context::AppContext;

use crate::{config::ServerConfig, state::State};

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

mod auth;
mod config;
mod extensions;
mod healthcheck;
mod meals;
mod observability;
mod orders;
mod restaurants;
mod router;
mod shutdown;
mod state;
#[cfg(test)]
mod test_helpers;
mod users;

/// Forchetta JSON API Server entry point
///
/// # Panics
///
/// Panics if the server fails to bind or serve requests
#[tokio::main]
pub async fn main() {
    // Load configuration from .env and CLI arguments
    let config = ServerConfig::load().unwrap_or_else(|e| {
        #[expect(
            clippy::print_stderr,
            reason = "logging not initialized yet, must use eprintln for config errors"
        )]
        {
            eprintln!("Configuration error: {e}");
        }

        process::exit(1);
    });

    if let Err(init_error) = observability::init(&config) {
        #[expect(
            clippy::print_stderr,
            reason = "subscriber failed to install, nothing else can report it"
        )]
        {
            eprintln!("Logging error: {init_error}");
        }

        process::exit(1);
    }

    let addr = config.socket_addr();

    info!("Starting server on {addr}");

    // Bind server
    let listener = TcpListener::new(addr).bind().await;

    let app = match AppContext::connect(&config.app_settings()).await {
        Ok(app) => app,
        Err(init_error) => {
            error!("failed to initialize app context: {init_error}");

            process::exit(1);
        }
    };

    let token_type = if app.auth.issues_verifiable_tokens() {
        "jwt"
    } else {
        "opaque"
    };

    info!(store = app.backend.as_str(), token_type, "app context ready");

    let router = Router::new()
        .hoop(CatchPanic::new())
        .hoop(observability::request_logging)
        .hoop(remove_slash())
        .hoop(inject(State::from_app_context(app)))
        .push(router::app_router());

    let doc = OpenApi::new("Forchetta API", env!("CARGO_PKG_VERSION"))
        .add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        )
        .merge_router(&router);

    let router = router
        .push(doc.into_router("/api-doc/openapi.json"))
        .push(SwaggerUi::new("/api-doc/openapi.json").into_router("docs"));

    let server = Server::new(listener);

    let handle = server.handle();

    // Listen for shutdown signal
    tokio::spawn(async move {
        if let Err(error) = shutdown::listen(handle).await {
            error!("failed to listen for shutdown signal: {error}");
        }
    });

    // Start serving requests
    server.serve(router).await;
}
