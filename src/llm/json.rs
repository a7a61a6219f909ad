//! Pulling a JSON object out of model output that may carry fences or prose.

use serde_json::{Map, Value};

use super::Generated;

/// Why generator output could not be turned into a JSON object.
#[derive(Debug, Clone, PartialEq)]
pub enum ExtractError {
    /// No `{...}` span, or the span was not valid JSON.
    Unparseable,
    /// Valid JSON, but not an object.
    NotAnObject,
}

/// Trims whitespace and backtick fences, including a ```json language tag.
pub fn strip_fences(text: &str) -> &str {
    let trimmed = text.trim().trim_matches('`').trim();
    trimmed
        .strip_prefix("json")
        .or_else(|| trimmed.strip_prefix("JSON"))
        .map(str::trim)
        .unwrap_or(trimmed)
}

/// Span from the first `{` to the last `}`, if both exist in that order.
pub fn object_span(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end > start).then(|| &text[start..=end])
}

pub fn extract_object(generated: &Generated) -> Result<Map<String, Value>, ExtractError> {
    let value = match generated {
        Generated::Structured(Value::String(text)) | Generated::Text(text) => {
            let span = object_span(strip_fences(text)).ok_or(ExtractError::Unparseable)?;
            serde_json::from_str::<Value>(span).map_err(|_| ExtractError::Unparseable)?
        }
        Generated::Structured(v) => v.clone(),
    };
    match value {
        Value::Object(map) => Ok(map),
        _ => Err(ExtractError::NotAnObject),
    }
}
