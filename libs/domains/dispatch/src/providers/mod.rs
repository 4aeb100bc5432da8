//! Email provider implementations.
//!
//! The dispatch pipeline talks to providers only through [`EmailProvider`],
//! so tests can swap in a recording or mocked implementation.

mod sendgrid;

pub use sendgrid::{DEFAULT_SENDGRID_API_URL, SendGridProvider};

use crate::error::ProviderError;
use crate::payload::ProviderPayload;
use async_trait::async_trait;

/// Secret material for one provider call.
#[derive(Clone)]
pub struct ProviderCredentials {
    pub api_key: String,
}

impl std::fmt::Debug for ProviderCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderCredentials")
            .field("api_key", &"<redacted>")
            .finish()
    }
}

/// Trait for email sending providers.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EmailProvider: Send + Sync {
    /// Deliver a fully built message. One attempt, no retries.
    async fn send(
        &self,
        payload: &ProviderPayload,
        credentials: &ProviderCredentials,
    ) -> Result<(), ProviderError>;

    /// Provider name for logging.
    fn name(&self) -> &'static str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credentials_debug_is_redacted() {
        let credentials = ProviderCredentials {
            api_key: "SG.super-secret".into(),
        };
        let rendered = format!("{credentials:?}");
        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains("<redacted>"));
    }
}
