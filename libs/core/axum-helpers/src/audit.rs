//! Audit logging for security and compliance.
//!
//! Structured events for security-relevant actions such as sending mail on
//! behalf of a caller or rejecting an unauthenticated request.
//!
//! # Example
//! ```ignore
//! use axum_helpers::audit::{AuditEvent, AuditOutcome};
//!
//! AuditEvent::new(Some(caller_id), "email.send", AuditOutcome::Success)
//!     .with_ip(extract_ip_from_headers(&headers))
//!     .with_details(json!({"recipients": 3}))
//!     .log();
//! ```

use axum::http::HeaderMap;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Outcome of an audited action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AuditOutcome {
    Success,
    Failure,
    Denied,
}

/// Structured audit event, emitted on the `audit` tracing target.
#[derive(Debug, Serialize)]
pub struct AuditEvent {
    /// Caller who performed the action (if authenticated)
    pub caller_id: Option<String>,
    /// Action performed (e.g., "email.send")
    pub action: String,
    pub outcome: AuditOutcome,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    #[serde(with = "chrono::serde::ts_seconds")]
    pub timestamp: DateTime<Utc>,
    pub details: Option<serde_json::Value>,
}

impl AuditEvent {
    pub fn new(caller_id: Option<String>, action: impl Into<String>, outcome: AuditOutcome) -> Self {
        Self {
            caller_id,
            action: action.into(),
            outcome,
            ip_address: None,
            user_agent: None,
            timestamp: Utc::now(),
            details: None,
        }
    }

    pub fn with_ip(mut self, ip: Option<String>) -> Self {
        self.ip_address = ip;
        self
    }

    pub fn with_user_agent(mut self, user_agent: Option<String>) -> Self {
        self.user_agent = user_agent;
        self
    }

    pub fn with_details(mut self, details: impl Serialize) -> Self {
        self.details = serde_json::to_value(details).ok();
        self
    }

    /// Emit the event on the `audit` target with structured fields.
    pub fn log(self) {
        let details = self
            .details
            .as_ref()
            .map(|d| d.to_string())
            .unwrap_or_default();

        tracing::info!(
            target: "audit",
            caller_id = self.caller_id.as_deref(),
            action = %self.action,
            outcome = ?self.outcome,
            ip = self.ip_address.as_deref(),
            user_agent = self.user_agent.as_deref(),
            timestamp = self.timestamp.timestamp(),
            details = %details,
            "audit event"
        );
    }
}

/// Extract client IP address from proxy headers.
///
/// First entry of X-Forwarded-For, falling back to X-Real-IP.
pub fn extract_ip_from_headers(headers: &HeaderMap) -> Option<String> {
    headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.split(',').next())
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .or_else(|| {
            headers
                .get("x-real-ip")
                .and_then(|v| v.to_str().ok())
                .map(|s| s.to_string())
        })
}

/// Extract user agent string from HTTP headers.
pub fn extract_user_agent(headers: &HeaderMap) -> Option<String> {
    headers
        .get("user-agent")
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string())
}
