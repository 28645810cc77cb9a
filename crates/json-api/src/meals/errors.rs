//! Meal Errors

use salvo::http::StatusError;
use tracing::error;

use forchetta_app::domain::meals::{MealsServiceError, data::MealInputError};

pub(crate) fn into_status_error(error: MealsServiceError) -> StatusError {
    match error {
        MealsServiceError::Validation(message) => StatusError::bad_request().brief(message),
        MealsServiceError::NotFound => StatusError::not_found().brief("Meal not found"),
        MealsServiceError::Conflict => {
            StatusError::conflict().brief("Could not assign a meal id, retry")
        }
        MealsServiceError::Store(source) => {
            error!("meal store failure: {source}");

            StatusError::internal_server_error().brief(source.to_string())
        }
    }
}

pub(crate) fn invalid_payload(error: MealInputError) -> StatusError {
    StatusError::bad_request().brief(error.to_string())
}
