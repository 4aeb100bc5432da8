//! SendGrid v3 provider.

use super::{EmailProvider, ProviderCredentials};
use crate::error::ProviderError;
use crate::payload::ProviderPayload;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info, warn};

pub const DEFAULT_SENDGRID_API_URL: &str = "https://api.sendgrid.com/v3";

/// SendGrid email provider.
///
/// Holds one pooled client for the lifetime of the process.
#[derive(Debug, Clone)]
pub struct SendGridProvider {
    client: Client,
    api_url: String,
}

impl SendGridProvider {
    pub fn new(api_url: impl Into<String>, timeout: Duration) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ProviderError::Unreachable(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            api_url: api_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn send_url(&self) -> String {
        format!("{}/mail/send", self.api_url)
    }
}

#[derive(Debug, Deserialize)]
struct SendGridError {
    errors: Vec<SendGridErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct SendGridErrorDetail {
    message: String,
}

/// Human-readable rejection reason: joined `errors[].message`, else the raw
/// body, else the status reason phrase.
fn rejection_message(status: reqwest::StatusCode, body: &str) -> String {
    if let Ok(parsed) = serde_json::from_str::<SendGridError>(body) {
        let joined = parsed
            .errors
            .into_iter()
            .map(|e| e.message)
            .filter(|m| !m.is_empty())
            .collect::<Vec<_>>()
            .join(", ");
        if !joined.is_empty() {
            return joined;
        }
    }

    if !body.trim().is_empty() {
        return body.trim().to_string();
    }

    status
        .canonical_reason()
        .unwrap_or("unknown error")
        .to_string()
}

#[async_trait]
impl EmailProvider for SendGridProvider {
    async fn send(
        &self,
        payload: &ProviderPayload,
        credentials: &ProviderCredentials,
    ) -> Result<(), ProviderError> {
        debug!(
            subject = %payload.subject,
            attachments = payload.attachments.len(),
            "Sending email via SendGrid"
        );

        let response = self
            .client
            .post(self.send_url())
            .bearer_auth(&credentials.api_key)
            .json(payload)
            .send()
            .await
            .map_err(|e| ProviderError::Unreachable(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            let message_id = response
                .headers()
                .get("x-message-id")
                .and_then(|v| v.to_str().ok())
                .map(str::to_string);
            info!(status = %status, message_id = ?message_id, "Email accepted by SendGrid");
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        let provider_message = rejection_message(status, &body);
        warn!(status = %status, error = %provider_message, "SendGrid rejected the message");

        Err(ProviderError::Rejected {
            status_code: status.as_u16(),
            provider_message,
        })
    }

    fn name(&self) -> &'static str {
        "SendGrid"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payload::{ContentPart, EmailAddress, Personalization};
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn payload() -> ProviderPayload {
        ProviderPayload {
            personalizations: vec![Personalization {
                to: vec![EmailAddress::bare("a@b.com")],
                cc: vec![],
                bcc: vec![],
            }],
            from: EmailAddress::bare("noreply@example.com"),
            reply_to: None,
            subject: "Hi".into(),
            content: vec![ContentPart {
                content_type: "text/plain".into(),
                value: String::new(),
            }],
            attachments: vec![],
        }
    }

    fn credentials() -> ProviderCredentials {
        ProviderCredentials {
            api_key: "SG.test".into(),
        }
    }

    fn provider(server: &MockServer) -> SendGridProvider {
        SendGridProvider::new(server.uri(), Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn test_send_success() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/mail/send"))
            .and(header("authorization", "Bearer SG.test"))
            .and(body_partial_json(serde_json::json!({
                "subject": "Hi",
                "personalizations": [{"to": [{"email": "a@b.com"}]}]
            })))
            .respond_with(ResponseTemplate::new(202).insert_header("x-message-id", "abc123"))
            .expect(1)
            .mount(&server)
            .await;

        provider(&server).send(&payload(), &credentials()).await.unwrap();
    }

    #[tokio::test]
    async fn test_rejection_joins_provider_messages() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/mail/send"))
            .respond_with(ResponseTemplate::new(403).set_body_json(serde_json::json!({
                "errors": [
                    {"message": "The from address does not match a verified Sender Identity", "field": "from"},
                    {"message": "Second problem", "field": null}
                ]
            })))
            .mount(&server)
            .await;

        let err = provider(&server)
            .send(&payload(), &credentials())
            .await
            .unwrap_err();

        assert_eq!(
            err,
            ProviderError::Rejected {
                status_code: 403,
                provider_message:
                    "The from address does not match a verified Sender Identity, Second problem"
                        .into(),
            }
        );
    }

    #[tokio::test]
    async fn test_rejection_falls_back_to_raw_body_then_reason() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(400).set_body_string("plain failure"))
            .up_to_n_times(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let provider = provider(&server);
        let first = provider.send(&payload(), &credentials()).await.unwrap_err();
        assert_eq!(
            first,
            ProviderError::Rejected {
                status_code: 400,
                provider_message: "plain failure".into(),
            }
        );

        let second = provider.send(&payload(), &credentials()).await.unwrap_err();
        assert_eq!(
            second,
            ProviderError::Rejected {
                status_code: 503,
                provider_message: "Service Unavailable".into(),
            }
        );
    }

    #[tokio::test]
    async fn test_unreachable_on_connection_failure() {
        // Port 9 (discard) on loopback is not expected to accept connections.
        let provider = SendGridProvider::new("http://127.0.0.1:9", Duration::from_secs(2)).unwrap();
        let err = provider.send(&payload(), &credentials()).await.unwrap_err();
        assert!(matches!(err, ProviderError::Unreachable(_)));
    }

    #[tokio::test]
    async fn test_unreachable_on_timeout() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(202).set_delay(Duration::from_secs(2)))
            .mount(&server)
            .await;

        let provider = SendGridProvider::new(server.uri(), Duration::from_millis(100)).unwrap();
        let err = provider.send(&payload(), &credentials()).await.unwrap_err();
        assert!(matches!(err, ProviderError::Unreachable(_)));
    }

    #[test]
    fn test_trailing_slash_is_trimmed() {
        let provider =
            SendGridProvider::new("https://api.sendgrid.com/v3/", Duration::from_secs(1)).unwrap();
        assert_eq!(provider.send_url(), "https://api.sendgrid.com/v3/mail/send");
        assert_eq!(provider.name(), "SendGrid");
    }
}
