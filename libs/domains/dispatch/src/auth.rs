//! Caller authentication for the dispatch endpoint.

use crate::error::AuthError;
use crate::models::CallerIdentity;
use async_trait::async_trait;
use axum::http::HeaderMap;
use axum_helpers::{JwtAuth, bearer_token};
use std::sync::Arc;

/// Verifies a bearer credential and reports who presented it.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Authenticator: Send + Sync {
    async fn verify(&self, token: &str) -> Result<CallerIdentity, AuthError>;
}

#[async_trait]
impl Authenticator for JwtAuth {
    async fn verify(&self, token: &str) -> Result<CallerIdentity, AuthError> {
        let claims = self
            .verify_token(token)
            .map_err(|e| AuthError::InvalidCredential(e.to_string()))?;

        Ok(CallerIdentity {
            id: claims.sub,
            email: claims.email,
        })
    }
}

/// Whether the endpoint demands a credential.
#[derive(Clone)]
pub enum AuthMode {
    /// Anonymous calls are accepted and no header is inspected.
    Disabled,
    Required(Arc<dyn Authenticator>),
}

impl AuthMode {
    pub fn required(authenticator: impl Authenticator + 'static) -> Self {
        Self::Required(Arc::new(authenticator))
    }

    pub fn is_required(&self) -> bool {
        matches!(self, Self::Required(_))
    }

    /// Resolve the caller from request headers.
    ///
    /// Returns `Ok(None)` only when auth is disabled.
    pub async fn authenticate(
        &self,
        headers: &HeaderMap,
    ) -> Result<Option<CallerIdentity>, AuthError> {
        let Self::Required(authenticator) = self else {
            return Ok(None);
        };

        let token = bearer_token(headers).ok_or(AuthError::MissingCredential)?;
        let caller = authenticator.verify(token).await?;
        tracing::debug!(caller_id = %caller.id, "Caller authenticated");

        Ok(Some(caller))
    }
}

impl std::fmt::Debug for AuthMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Disabled => f.write_str("Disabled"),
            Self::Required(_) => f.write_str("Required"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{HeaderValue, header::AUTHORIZATION};
    use axum_helpers::JwtConfig;
    use mockall::predicate::eq;

    const SECRET: &str = "dispatch-test-secret-with-32-chars!!";

    fn headers_with(value: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static(value));
        headers
    }

    #[tokio::test]
    async fn test_disabled_ignores_headers() {
        let caller = AuthMode::Disabled
            .authenticate(&headers_with("Bearer garbage"))
            .await
            .unwrap();
        assert_eq!(caller, None);
    }

    #[tokio::test]
    async fn test_missing_header_is_rejected_without_verifying() {
        let mut mock = MockAuthenticator::new();
        mock.expect_verify().never();

        let mode = AuthMode::required(mock);
        assert_eq!(
            mode.authenticate(&HeaderMap::new()).await,
            Err(AuthError::MissingCredential)
        );
        assert_eq!(
            mode.authenticate(&headers_with("Basic dXNlcjpwYXNz")).await,
            Err(AuthError::MissingCredential)
        );
    }

    #[tokio::test]
    async fn test_token_is_forwarded_to_authenticator() {
        let mut mock = MockAuthenticator::new();
        mock.expect_verify()
            .with(eq("abc.def.ghi"))
            .times(1)
            .returning(|_| {
                Ok(CallerIdentity {
                    id: "user-1".into(),
                    email: None,
                })
            });

        let caller = AuthMode::required(mock)
            .authenticate(&headers_with("Bearer abc.def.ghi"))
            .await
            .unwrap();
        assert_eq!(caller.map(|c| c.id).as_deref(), Some("user-1"));
    }

    #[tokio::test]
    async fn test_authenticator_rejection_propagates() {
        let mut mock = MockAuthenticator::new();
        mock.expect_verify()
            .returning(|_| Err(AuthError::InvalidCredential("expired".into())));

        let result = AuthMode::required(mock)
            .authenticate(&headers_with("Bearer stale"))
            .await;
        assert!(matches!(result, Err(AuthError::InvalidCredential(_))));
    }

    #[tokio::test]
    async fn test_jwt_authenticator() {
        let jwt = JwtAuth::new(&JwtConfig::new(SECRET));
        let token = jwt.create_token("user-42", Some("u@example.com"), 300).unwrap();

        let caller = jwt.verify(&token).await.unwrap();
        assert_eq!(caller.id, "user-42");
        assert_eq!(caller.email.as_deref(), Some("u@example.com"));

        assert!(matches!(
            jwt.verify("not-a-jwt").await,
            Err(AuthError::InvalidCredential(_))
        ));
    }
}
