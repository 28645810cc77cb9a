//! Restaurant Errors

use salvo::http::StatusError;
use tracing::error;

use forchetta_app::domain::restaurants::RestaurantsServiceError;

pub(crate) fn into_status_error(error: RestaurantsServiceError) -> StatusError {
    match error {
        RestaurantsServiceError::Validation(message) => StatusError::bad_request().brief(message),
        RestaurantsServiceError::NotFound => StatusError::not_found().brief("Restaurant not found"),
        RestaurantsServiceError::Conflict => {
            StatusError::conflict().brief("Restaurant id or partita IVA already registered")
        }
        RestaurantsServiceError::Store(source) => {
            error!("restaurant store failure: {source}");

            StatusError::internal_server_error().brief(source.to_string())
        }
    }
}
