use crate::errors::handlers::panic_response;
use axum::response::Response;
use std::any::Any;
use tower_http::catch_panic::CatchPanicLayer;

/// Panic handler signature used by [`catch_panic_layer`].
pub type PanicHandler = fn(Box<dyn Any + Send + 'static>) -> Response;

/// Layer that turns a panicking handler into a `500 {ok: false, error}` response
/// instead of dropping the connection.
pub fn catch_panic_layer() -> CatchPanicLayer<PanicHandler> {
    CatchPanicLayer::custom(panic_response as PanicHandler)
}
