pub mod handlers;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

/// Standard error response structure.
///
/// Every failed request gets the same envelope as successful ones, with
/// `ok` set to `false` and a human-readable `error` message.
///
/// # JSON Example
///
/// ```json
/// { "ok": false, "error": "Missing \"to\"" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub ok: bool,
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            ok: false,
            error: error.into(),
        }
    }
}

/// Build a JSON error response with the given status.
pub fn json_error(status: StatusCode, error: impl Into<String>) -> Response {
    (status, Json(ErrorResponse::new(error))).into_response()
}
