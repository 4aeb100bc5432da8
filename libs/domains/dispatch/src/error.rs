//! Error types for the dispatch domain.
//!
//! Each family maps onto one slice of the HTTP contract:
//! validation and auth errors are the caller's fault (4xx), configuration
//! errors are the operator's (500), provider errors are upstream (502).

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_helpers::json_error;
use thiserror::Error;

/// Result type for dispatch operations.
pub type DispatchResult<T> = Result<T, DispatchError>;

/// The request body could not be turned into a sendable message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Invalid JSON body")]
    MalformedBody(String),

    #[error("Missing \"to\"")]
    MissingRecipient,

    #[error("Attachments too large ({total} bytes, limit {limit} bytes base64)")]
    AttachmentsTooLarge { total: usize, limit: usize },

    #[error("Request body too large (limit {limit} bytes)")]
    BodyTooLarge { limit: usize },
}

/// The caller could not be identified.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("Missing Authorization Bearer token")]
    MissingCredential,

    /// The reason is logged, never echoed to the caller.
    #[error("Invalid or expired credential")]
    InvalidCredential(String),
}

/// Provider settings are incomplete; the service refuses to send.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    #[error("Server missing SENDGRID_API_KEY")]
    MissingApiKey,

    #[error("SENDGRID_API_KEY must start with 'SG.'")]
    MalformedApiKey,

    #[error("Server missing SENDER_EMAIL")]
    MissingSender,

    #[error("SENDER_EMAIL is not a valid address")]
    InvalidSender,
}

/// The email provider did not accept the message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    #[error("Email provider rejected the message ({status_code}): {provider_message}")]
    Rejected {
        status_code: u16,
        provider_message: String,
    },

    #[error("Email provider unreachable: {0}")]
    Unreachable(String),
}

/// Every way a dispatch request can fail.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error("Use POST")]
    MethodNotAllowed,

    #[error("{0}")]
    Internal(String),
}

impl DispatchError {
    pub fn status(&self) -> StatusCode {
        match self {
            DispatchError::Validation(
                ValidationError::AttachmentsTooLarge { .. } | ValidationError::BodyTooLarge { .. },
            ) => StatusCode::PAYLOAD_TOO_LARGE,
            DispatchError::Validation(_) => StatusCode::BAD_REQUEST,
            DispatchError::Auth(_) => StatusCode::UNAUTHORIZED,
            DispatchError::Configuration(_) => StatusCode::INTERNAL_SERVER_ERROR,
            DispatchError::Provider(_) => StatusCode::BAD_GATEWAY,
            DispatchError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            DispatchError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for DispatchError {
    fn into_response(self) -> Response {
        let status = self.status();

        match &self {
            DispatchError::Validation(e) => tracing::info!(error = ?e, "Rejected invalid send request"),
            DispatchError::Auth(e) => tracing::info!(error = ?e, "Rejected unauthenticated send request"),
            DispatchError::Configuration(e) => {
                tracing::error!(error = %e, "Email provider is not configured")
            }
            DispatchError::Provider(e) => tracing::warn!(error = %e, "Email provider failure"),
            DispatchError::MethodNotAllowed => {}
            DispatchError::Internal(msg) => tracing::error!(error = %msg, "Internal dispatch error"),
        }

        json_error(status, self.to_string())
    }
}
