//! SendGrid v3 `mail/send` request body, built from a validated request.

use crate::models::SendRequest;
use serde::Serialize;

pub const TEXT_PLAIN: &str = "text/plain";
pub const TEXT_HTML: &str = "text/html";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProviderPayload {
    pub personalizations: Vec<Personalization>,
    pub from: EmailAddress,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_to: Option<EmailAddress>,
    pub subject: String,
    pub content: Vec<ContentPart>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<AttachmentPart>,
}

/// One recipient group. A single personalization carries every recipient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Personalization {
    pub to: Vec<EmailAddress>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub cc: Vec<EmailAddress>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub bcc: Vec<EmailAddress>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmailAddress {
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl EmailAddress {
    pub fn bare(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            name: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContentPart {
    #[serde(rename = "type")]
    pub content_type: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttachmentPart {
    pub content: String,
    pub filename: String,
    #[serde(rename = "type")]
    pub mime_type: String,
    pub disposition: String,
}

/// Assemble the provider payload.
///
/// The sender address always comes from configuration; the caller may only
/// choose its display name. Plain text precedes HTML because the provider
/// rejects any other order, and at least one content part is always present.
pub fn build(req: SendRequest, sender: &str) -> ProviderPayload {
    let SendRequest {
        to,
        cc,
        bcc,
        subject,
        text,
        html,
        from_name,
        reply_to,
        attachments,
    } = req;

    let mut content = Vec::with_capacity(2);
    if let Some(value) = text {
        content.push(ContentPart {
            content_type: TEXT_PLAIN.to_string(),
            value,
        });
    }
    if let Some(value) = html {
        content.push(ContentPart {
            content_type: TEXT_HTML.to_string(),
            value,
        });
    }
    if content.is_empty() {
        content.push(ContentPart {
            content_type: TEXT_PLAIN.to_string(),
            value: String::new(),
        });
    }

    ProviderPayload {
        personalizations: vec![Personalization {
            to: to.into_iter().map(EmailAddress::bare).collect(),
            cc: cc.into_iter().map(EmailAddress::bare).collect(),
            bcc: bcc.into_iter().map(EmailAddress::bare).collect(),
        }],
        from: EmailAddress {
            email: sender.to_string(),
            name: from_name,
        },
        reply_to: reply_to.map(EmailAddress::bare),
        subject,
        content,
        attachments: attachments
            .into_iter()
            .map(|a| AttachmentPart {
                content: a.content,
                filename: a.filename,
                mime_type: a.mime_type,
                disposition: a.disposition,
            })
            .collect(),
    }
}
