use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{EngineError, EngineResult};

/// Tagged result at the generative-text boundary.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseOutcome<T> {
    Parsed(T),
    ParseFailure(String),
}

impl<T> ParseOutcome<T> {
    pub fn into_result(self) -> EngineResult<T> {
        match self {
            ParseOutcome::Parsed(v) => Ok(v),
            ParseOutcome::ParseFailure(reason) => Err(EngineError::ResponseParse(reason)),
        }
    }
}

impl<T> From<EngineResult<T>> for ParseOutcome<T> {
    fn from(result: EngineResult<T>) -> Self {
        match result {
            Ok(v) => ParseOutcome::Parsed(v),
            Err(e) => ParseOutcome::ParseFailure(e.to_string()),
        }
    }
}

/// Strips ```json ... ``` or ``` ... ``` fences, wherever they sit in the text.
fn strip_code_fences(text: &str) -> &str {
    let text = text.trim();
    let Some(start) = text.find("```") else {
        return text;
    };
    let body = &text[start + 3..];
    // Skip the info string ("json", "JSON", ...)
    let body = match body.find('\n') {
        Some(nl) if body[..nl].chars().all(|c| c.is_ascii_alphanumeric()) => &body[nl + 1..],
        _ => body,
    };
    match body.find("```") {
        Some(end) => body[..end].trim(),
        None => body.trim(),
    }
}

/// Locate the outermost `{ ... }` span: first `{` to last `}`.
fn object_span(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end > start).then(|| &text[start..=end])
}

/// Pull the JSON object out of a free-form completion.
pub fn extract_json(text: &str) -> EngineResult<Value> {
    let stripped = strip_code_fences(text);

    // A fence may hold something other than the object; fall back to the full text
    let span = object_span(stripped)
        .or_else(|| object_span(text))
        .ok_or_else(|| EngineError::ResponseParse("no JSON object found".to_string()))?;

    serde_json::from_str(span).map_err(|e| EngineError::ResponseParse(e.to_string()))
}

/// Extract and deserialize into `T`.
pub fn parse_response<T: DeserializeOwned>(text: &str) -> EngineResult<T> {
    let value = extract_json(text)?;
    serde_json::from_value(value).map_err(|e| EngineError::ResponseParse(e.to_string()))
}

/// Same as `parse_response`, as a tagged outcome.
pub fn parse_outcome<T: DeserializeOwned>(text: &str) -> ParseOutcome<T> {
    parse_response(text).into()
}

/// Check that an object carries every required key with a non-null value.
pub fn require_fields(value: &Value, fields: &[&str]) -> EngineResult<()> {
    let object = value
        .as_object()
        .ok_or_else(|| EngineError::ResponseParse("response is not a JSON object".to_string()))?;

    let missing: Vec<&str> = fields
        .iter()
        .copied()
        .filter(|f| object.get(*f).map_or(true, Value::is_null))
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(EngineError::ResponseParse(format!(
            "missing required fields: {}",
            missing.join(", ")
        )))
    }
}
