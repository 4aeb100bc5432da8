use axum::{
    extract::Request,
    http::{
        HeaderValue, StatusCode,
        header::{
            ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS,
            ACCESS_CONTROL_ALLOW_ORIGIN,
        },
    },
    middleware::Next,
    response::{IntoResponse, Response},
};

pub const ALLOW_ORIGIN: &str = "*";
pub const ALLOW_METHODS: &str = "POST,OPTIONS";
pub const ALLOW_HEADERS: &str = "Content-Type,Authorization";

fn apply(response: &mut Response) {
    let headers = response.headers_mut();
    headers.insert(
        ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static(ALLOW_ORIGIN),
    );
    headers.insert(
        ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static(ALLOW_METHODS),
    );
    headers.insert(
        ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static(ALLOW_HEADERS),
    );
}

/// Middleware that stamps the fixed CORS header set on every response,
/// errors included.
///
/// Unlike `tower_http::cors::CorsLayer`, the headers do not depend on the
/// request carrying an `Origin` header.
pub async fn cors_headers(request: Request, next: Next) -> Response {
    let mut response = next.run(request).await;
    apply(&mut response);
    response
}

/// Preflight handler: empty 204 with the CORS header set.
pub async fn preflight() -> Response {
    let mut response = StatusCode::NO_CONTENT.into_response();
    apply(&mut response);
    response
}
