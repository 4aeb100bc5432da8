use axum::{
    Json, Router,
    body::{Body, Bytes},
    extract::State,
    http::{HeaderMap, StatusCode},
    middleware,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use axum_helpers::{
    AuditEvent, AuditOutcome, catch_panic_layer, cors_headers, extract_ip_from_headers,
    extract_user_agent, json_error, preflight,
};
use http_body_util::LengthLimitError;
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;

use crate::error::{DispatchError, DispatchResult, ValidationError};
use crate::models::SendResponse;
use crate::service::DispatchService;
use crate::validator;

const SEND_ACTION: &str = "email.send";

/// Create the dispatch router: the send endpoint plus `/ready`.
///
/// Every response, panics included, carries the fixed CORS header set.
pub fn router(service: DispatchService) -> Router {
    let path = service.path().to_string();
    let shared_service = Arc::new(service);

    Router::new()
        .route(
            &path,
            post(send_email)
                .options(preflight)
                .fallback(method_not_allowed),
        )
        .route("/ready", get(readiness))
        .layer(catch_panic_layer())
        .layer(middleware::from_fn(cors_headers))
        .with_state(shared_service)
}

/// The send endpoint. Auth runs before the body is read.
async fn send_email(
    State(service): State<Arc<DispatchService>>,
    headers: HeaderMap,
    body: Body,
) -> DispatchResult<Json<SendResponse>> {
    let caller = match service.authenticate(&headers).await {
        Ok(caller) => caller,
        Err(e) => {
            audit(&headers, None, AuditOutcome::Denied, json!({"reason": e.to_string()}));
            return Err(e.into());
        }
    };
    let caller_id = caller.as_ref().map(|c| c.id.clone());

    let bytes = read_body(body, service.max_body_bytes()).await?;
    let request = validator::validate(&bytes)?;

    let recipients = request.recipient_count();
    let subject = request.subject.clone();
    let to = request.to.clone();

    match service.dispatch(request, caller.as_ref()).await {
        Ok(response) => {
            audit(
                &headers,
                caller_id,
                AuditOutcome::Success,
                json!({
                    "caller_email": caller.and_then(|c| c.email),
                    "to": to,
                    "recipients": recipients,
                    "subject": subject,
                    "provider": service.provider_name(),
                }),
            );
            Ok(Json(response))
        }
        Err(e) => {
            if matches!(e, DispatchError::Provider(_)) {
                audit(
                    &headers,
                    caller_id,
                    AuditOutcome::Failure,
                    json!({"recipients": recipients, "error": e.to_string()}),
                );
            }
            Err(e)
        }
    }
}

async fn read_body(body: Body, limit: usize) -> DispatchResult<Bytes> {
    axum::body::to_bytes(body, limit).await.map_err(|e| {
        let over_limit = std::error::Error::source(&e)
            .is_some_and(|source| source.downcast_ref::<LengthLimitError>().is_some());
        if over_limit {
            ValidationError::BodyTooLarge { limit }.into()
        } else {
            DispatchError::Internal(format!("failed to read request body: {e}"))
        }
    })
}

async fn method_not_allowed() -> DispatchError {
    DispatchError::MethodNotAllowed
}

#[derive(Serialize)]
struct ReadyResponse {
    ok: bool,
    provider: &'static str,
    sender: String,
}

/// Readiness: 200 when provider settings would allow a send, 503 otherwise.
async fn readiness(State(service): State<Arc<DispatchService>>) -> Response {
    match service.readiness() {
        Ok(ready) => Json(ReadyResponse {
            ok: true,
            provider: service.provider_name(),
            sender: ready.sender,
        })
        .into_response(),
        Err(e) => {
            tracing::warn!(error = %e, "Readiness check failed");
            json_error(StatusCode::SERVICE_UNAVAILABLE, e.to_string())
        }
    }
}

fn audit(
    headers: &HeaderMap,
    caller_id: Option<String>,
    outcome: AuditOutcome,
    details: serde_json::Value,
) {
    AuditEvent::new(caller_id, SEND_ACTION, outcome)
        .with_ip(extract_ip_from_headers(headers))
        .with_user_agent(extract_user_agent(headers))
        .with_details(details)
        .log();
}
