//! Extracting the JSON document from an agent's final answer

use serde_json::Value;

use crate::error::ParseError;

/// Remove a surrounding Markdown code fence, if any
///
/// The ```` ```json ```` (or bare ```` ``` ````) opener and the closing
/// ```` ``` ```` are stripped independently; agents sometimes emit only one.
#[must_use]
pub fn strip_json_fence(answer: &str) -> &str {
    let mut rest = answer.trim();
    if let Some(body) = rest.strip_prefix("```") {
        rest = body
            .strip_prefix("json")
            .or_else(|| body.strip_prefix("JSON"))
            .unwrap_or(body);
    }
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

/// Parse an answer into JSON, stripping a fence first
pub fn parse_payload(answer: &str) -> Result<Value, ParseError> {
    serde_json::from_str(strip_json_fence(answer)).map_err(|e| ParseError::Json(e.to_string()))
}
