//! Order Errors

use salvo::http::StatusError;
use tracing::error;

use forchetta_app::domain::orders::OrdersServiceError;

pub(crate) fn into_status_error(error: OrdersServiceError) -> StatusError {
    match error {
        OrdersServiceError::Validation(message) => StatusError::bad_request().brief(message),
        OrdersServiceError::EmptyCart => StatusError::bad_request().brief("Cart is empty"),
        OrdersServiceError::NotFound => StatusError::not_found().brief("Order not found"),
        error @ (OrdersServiceError::TerminalState(_)
        | OrdersServiceError::InvalidTransition { .. }) => {
            StatusError::conflict().brief(error.to_string())
        }
        OrdersServiceError::Conflict => {
            StatusError::conflict().brief("Order was modified concurrently, retry")
        }
        OrdersServiceError::Store(source) => {
            error!("order store failure: {source}");

            StatusError::internal_server_error().brief(source.to_string())
        }
    }
}
