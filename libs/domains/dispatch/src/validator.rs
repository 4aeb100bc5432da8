//! Normalization and validation of untrusted send requests. No I/O.
//!
//! Rules:
//! - recipients may be a single value or a list; values are string-coerced,
//!   trimmed and shape-checked, invalid ones are dropped silently
//! - only an empty `to` fails the request
//! - subject and body never fail, they fall back to defaults
//! - the legacy `attachmentBase64` shorthand is merged ahead of `attachments`
//! - the attachment size ceiling applies to the merged list

use crate::error::ValidationError;
use crate::models::{Attachment, DEFAULT_SUBJECT, SendRequest};
use regex::Regex;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::sync::LazyLock;

pub const MAX_SUBJECT_CHARS: usize = 200;
pub const MAX_FROM_NAME_CHARS: usize = 80;
/// Ceiling on the summed base64 length of all attachments.
pub const MAX_ATTACHMENT_BYTES: usize = 10 * 1024 * 1024;

static EMAIL_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

const DATA_URL_MARKER: &str = "base64,";

/// Wire shape of the request body. Every field is kept as raw JSON so the
/// coercion rules below decide what a value means.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct RawSendRequest {
    to: Value,
    cc: Value,
    bcc: Value,
    subject: Value,
    text: Value,
    html: Value,
    from_name: Value,
    reply_to: Value,
    attachments: Value,
    attachment_base64: Value,
    attachment_filename: Value,
    attachment_type: Value,
}

/// Parse and validate a raw request body.
pub fn validate(body: &[u8]) -> Result<SendRequest, ValidationError> {
    let value: Value =
        serde_json::from_slice(body).map_err(|e| ValidationError::MalformedBody(e.to_string()))?;
    if !value.is_object() {
        return Err(ValidationError::MalformedBody(
            "expected a JSON object".to_string(),
        ));
    }
    let raw: RawSendRequest =
        serde_json::from_value(value).map_err(|e| ValidationError::MalformedBody(e.to_string()))?;

    let to = normalize_addresses(&raw.to);
    if to.is_empty() {
        return Err(ValidationError::MissingRecipient);
    }

    let attachments = normalize_attachments(
        &raw.attachment_base64,
        &raw.attachment_filename,
        &raw.attachment_type,
        &raw.attachments,
    );
    let total: usize = attachments.iter().map(|a| a.content.len()).sum();
    if total > MAX_ATTACHMENT_BYTES {
        return Err(ValidationError::AttachmentsTooLarge {
            total,
            limit: MAX_ATTACHMENT_BYTES,
        });
    }

    Ok(SendRequest {
        to,
        cc: normalize_addresses(&raw.cc),
        bcc: normalize_addresses(&raw.bcc),
        subject: non_empty(coerce_text(&raw.subject))
            .map(|s| truncate_chars(&s, MAX_SUBJECT_CHARS))
            .unwrap_or_else(|| DEFAULT_SUBJECT.to_string()),
        text: non_empty(coerce_text(&raw.text)),
        html: non_empty(coerce_text(&raw.html)),
        from_name: coerce_text(&raw.from_name)
            .filter(|s| !s.trim().is_empty())
            .map(|s| truncate_chars(&s, MAX_FROM_NAME_CHARS)),
        reply_to: normalize_addresses(&raw.reply_to).into_iter().next(),
        attachments,
    })
}

/// Basic `local@domain.tld` shape check.
pub fn is_valid_address(candidate: &str) -> bool {
    EMAIL_SHAPE.is_match(candidate)
}

/// Coerce a single value or a list into trimmed, shape-valid addresses.
/// Order and duplicates are preserved.
pub fn normalize_addresses(value: &Value) -> Vec<String> {
    let candidates: Vec<String> = match value {
        Value::Array(items) => items.iter().filter_map(coerce_text).collect(),
        other => coerce_text(other).into_iter().collect(),
    };

    candidates
        .into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty() && is_valid_address(s))
        .collect()
}

/// Remove a `data:<mime>;base64,` prefix if present.
pub fn strip_data_url(content: &str) -> String {
    let trimmed = content.trim();
    match trimmed.find(DATA_URL_MARKER) {
        Some(idx) => trimmed[idx + DATA_URL_MARKER.len()..].to_string(),
        None => trimmed.to_string(),
    }
}

fn normalize_attachments(
    legacy_content: &Value,
    legacy_filename: &Value,
    legacy_type: &Value,
    list: &Value,
) -> Vec<Attachment> {
    let mut out = Vec::new();

    if let Some(content) = attachment_content(legacy_content) {
        out.push(Attachment::new(
            content,
            coerce_text(legacy_filename),
            coerce_text(legacy_type),
            None,
        ));
    }

    if let Value::Array(items) = list {
        out.extend(items.iter().filter_map(Value::as_object).filter_map(list_attachment));
    }

    out
}

fn list_attachment(fields: &Map<String, Value>) -> Option<Attachment> {
    let field = |name: &str| fields.get(name).and_then(coerce_text);

    let content = fields
        .get("content")
        .and_then(attachment_content)
        .or_else(|| fields.get("base64").and_then(attachment_content))?;

    Some(Attachment::new(
        content,
        field("filename"),
        non_empty(field("mimeType")).or_else(|| field("type")),
        field("disposition"),
    ))
}

/// Stripped content, or `None` when nothing is left to send.
fn attachment_content(value: &Value) -> Option<String> {
    coerce_text(value)
        .map(|s| strip_data_url(&s))
        .filter(|s| !s.is_empty())
}

/// Lenient string coercion: strings, numbers and booleans become their text
/// form. `null`, objects and arrays are absent.
fn coerce_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Object(_) | Value::Array(_) => None,
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

fn truncate_chars(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}
