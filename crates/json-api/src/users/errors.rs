//! User Errors

use salvo::http::StatusError;
use tracing::error;

use forchetta_app::auth::AuthServiceError;

pub(crate) fn into_status_error(error: AuthServiceError) -> StatusError {
    match error {
        AuthServiceError::Validation(message) => StatusError::bad_request().brief(message),
        AuthServiceError::InvalidCredentials => {
            StatusError::unauthorized().brief("Invalid credentials")
        }
        AuthServiceError::NotFound => StatusError::not_found().brief("User not found"),
        AuthServiceError::Conflict => {
            StatusError::conflict().brief("Username or email already registered")
        }
        AuthServiceError::NotRestaurantOwner => {
            StatusError::forbidden().brief("Restaurant owner account required")
        }
        AuthServiceError::Token(source) => {
            error!("failed to issue session token: {source}");

            StatusError::internal_server_error()
        }
        AuthServiceError::Hashing(source) => {
            error!("{source}");

            StatusError::internal_server_error()
        }
        AuthServiceError::Store(source) => {
            error!("user store failure: {source}");

            StatusError::internal_server_error().brief(source.to_string())
        }
    }
}
