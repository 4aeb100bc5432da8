//! Request-scoped data model. Nothing here outlives one HTTP exchange.

use serde::Serialize;

pub const DEFAULT_SUBJECT: &str = "No subject";
pub const DEFAULT_FILENAME: &str = "attachment.bin";
pub const DEFAULT_MIME_TYPE: &str = "application/octet-stream";
pub const DEFAULT_DISPOSITION: &str = "attachment";

/// A normalized, validated send request.
///
/// Produced only by [`crate::validator::validate`]; `to` is never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendRequest {
    pub to: Vec<String>,
    pub cc: Vec<String>,
    pub bcc: Vec<String>,
    pub subject: String,
    pub text: Option<String>,
    pub html: Option<String>,
    pub from_name: Option<String>,
    pub reply_to: Option<String>,
    pub attachments: Vec<Attachment>,
}

impl SendRequest {
    pub fn recipient_count(&self) -> usize {
        self.to.len() + self.cc.len() + self.bcc.len()
    }
}

/// One attachment, base64 content with data-URL prefix already removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub content: String,
    pub filename: String,
    pub mime_type: String,
    pub disposition: String,
}

impl Attachment {
    /// Build an attachment, substituting defaults for missing or blank metadata.
    pub fn new(
        content: String,
        filename: Option<String>,
        mime_type: Option<String>,
        disposition: Option<String>,
    ) -> Self {
        fn or_default(value: Option<String>, default: &str) -> String {
            value
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| default.to_string())
        }

        Self {
            content,
            filename: or_default(filename, DEFAULT_FILENAME),
            mime_type: or_default(mime_type, DEFAULT_MIME_TYPE),
            disposition: or_default(disposition, DEFAULT_DISPOSITION),
        }
    }
}

/// Who is calling, as reported by the authenticator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CallerIdentity {
    pub id: String,
    pub email: Option<String>,
}

/// Body of a successful dispatch response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SendResponse {
    pub ok: bool,
    pub from: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub by_uid: Option<String>,
}
