use axum::{http::StatusCode, response::Response};
use std::any::Any;

use super::json_error;

/// Handler for 404 Not Found errors.
///
/// This can be used as a fallback handler in your router.
pub async fn not_found() -> Response {
    json_error(StatusCode::NOT_FOUND, "The requested resource was not found")
}

/// Convert a caught panic payload into a 500 response carrying its message.
pub fn panic_response(payload: Box<dyn Any + Send + 'static>) -> Response {
    let message = if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "Unknown panic message".to_string()
    };

    tracing::error!(panic = %message, "Request handler panicked");
    json_error(StatusCode::INTERNAL_SERVER_ERROR, message)
}
