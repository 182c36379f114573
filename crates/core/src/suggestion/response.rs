//! Decoding and post-processing of upstream replies.

use super::fallback::FallbackKind;
use crate::constants::{
    MIN_GENERATED_CHARS, MIN_REPLACEMENT_LINE_CHARS, TEMPLATE_ECHO_FRAGMENTS, TEMPLATE_ECHO_MARKER,
};
use serde_json::Value;

/// Generated text, tagged by the reply shape it was found in.
///
/// Shapes are tried in declaration order and the first match wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GeneratedText {
    /// `[{"generated_text": "..."}, ...]`, first element only.
    Sequence(String),
    /// `{"generated_text": "..."}`
    Object(String),
    /// `"..."`
    Bare(String),
}

impl GeneratedText {
    pub fn decode(body: &Value) -> Option<Self> {
        if let Some(text) = body
            .as_array()
            .and_then(|items| items.first())
            .and_then(generated_field)
        {
            return Some(Self::Sequence(text.to_string()));
        }
        if let Some(text) = generated_field(body) {
            return Some(Self::Object(text.to_string()));
        }
        body.as_str().map(|text| Self::Bare(text.to_string()))
    }

    pub fn text(&self) -> &str {
        match self {
            Self::Sequence(text) | Self::Object(text) | Self::Bare(text) => text,
        }
    }
}

fn generated_field(value: &Value) -> Option<&str> {
    value
        .get("generated_text")
        .and_then(Value::as_str)
        .filter(|text| !text.is_empty())
}

/// Decode the raw body as JSON.
pub fn parse_body(body: &[u8]) -> Result<Value, FallbackKind> {
    serde_json::from_slice(body).map_err(|e| {
        tracing::warn!(error = %e, "upstream body is not JSON");
        FallbackKind::ParseFailure
    })
}

/// Reject replies that report a failure.
///
/// A non-2xx status wins over everything else. A successful status with a JSON `null` body has
/// no shape at all and is treated as an unclassified fault.
pub fn classify(status: u16, body: &Value) -> Result<(), FallbackKind> {
    if !(200..300).contains(&status) {
        tracing::warn!(status, "upstream returned non-success status");
        return Err(FallbackKind::UpstreamError);
    }
    if body.is_null() {
        tracing::warn!("upstream returned a null body");
        return Err(FallbackKind::UnclassifiedFault);
    }
    if body.get("error").is_some_and(is_truthy) {
        tracing::warn!(error = %body["error"], "upstream reported an error");
        return Err(FallbackKind::UpstreamError);
    }
    Ok(())
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Trim generated text and strip an echoed instruction template.
///
/// Returns `None` when fewer than `MIN_GENERATED_CHARS` characters remain. When the text
/// contains the template marker, the first line longer than `MIN_REPLACEMENT_LINE_CHARS` that
/// carries no template fragment is returned instead; if there is no such line the trimmed text
/// is kept.
pub fn clean_generated(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.chars().count() < MIN_GENERATED_CHARS {
        return None;
    }
    if !trimmed.to_lowercase().contains(TEMPLATE_ECHO_MARKER) {
        return Some(trimmed.to_string());
    }

    let replacement = trimmed.lines().find(|line| {
        let lower = line.to_lowercase();
        line.chars().count() > MIN_REPLACEMENT_LINE_CHARS
            && !TEMPLATE_ECHO_FRAGMENTS
                .iter()
                .any(|fragment| lower.contains(fragment))
    });
    Some(replacement.unwrap_or(trimmed).trim().to_string())
}
