use axum::http::HeaderMap;
use std::sync::Arc;
use std::time::Duration;

use crate::auth::AuthMode;
use crate::config::{DispatchConfig, ProviderSettings, ReadyProvider};
use crate::error::{AuthError, ConfigurationError, DispatchResult, ProviderError};
use crate::models::{CallerIdentity, SendRequest, SendResponse};
use crate::payload;
use crate::providers::EmailProvider;

/// Service layer for the dispatch pipeline.
///
/// Holds only read-only state, so a single instance is shared by every request.
#[derive(Clone)]
pub struct DispatchService {
    auth: AuthMode,
    provider: Arc<dyn EmailProvider>,
    settings: ProviderSettings,
    path: String,
    provider_timeout: Duration,
    max_body_bytes: usize,
}

impl DispatchService {
    pub fn new(config: DispatchConfig, auth: AuthMode, provider: Arc<dyn EmailProvider>) -> Self {
        tracing::info!(
            path = %config.path,
            auth_required = auth.is_required(),
            provider = provider.name(),
            timeout = ?config.provider_timeout,
            "Dispatch service configured"
        );

        Self {
            auth,
            provider,
            settings: config.provider,
            path: config.path,
            provider_timeout: config.provider_timeout,
            max_body_bytes: config.max_body_bytes,
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn max_body_bytes(&self) -> usize {
        self.max_body_bytes
    }

    pub fn provider_name(&self) -> &'static str {
        self.provider.name()
    }

    pub async fn authenticate(
        &self,
        headers: &HeaderMap,
    ) -> Result<Option<CallerIdentity>, AuthError> {
        self.auth.authenticate(headers).await
    }

    pub fn readiness(&self) -> Result<ReadyProvider, ConfigurationError> {
        self.settings.ready()
    }

    /// Check readiness, build the provider payload and send it once.
    ///
    /// The provider call is bounded by the configured timeout.
    pub async fn dispatch(
        &self,
        request: SendRequest,
        caller: Option<&CallerIdentity>,
    ) -> DispatchResult<SendResponse> {
        let ready = self.readiness()?;
        let payload = payload::build(request, &ready.sender);

        tokio::time::timeout(
            self.provider_timeout,
            self.provider.send(&payload, &ready.credentials),
        )
        .await
        .map_err(|_| {
            ProviderError::Unreachable(format!(
                "no response within {}s",
                self.provider_timeout.as_secs_f32()
            ))
        })??;

        Ok(SendResponse {
            ok: true,
            from: ready.sender,
            by_uid: caller.map(|c| c.id.clone()),
        })
    }
}
