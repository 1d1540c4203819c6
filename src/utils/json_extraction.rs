//! JSON extraction utilities for parsing LLM responses.
//!
//! Search-grounded models wrap structured output inconsistently: sometimes in a
//! ```` ```json ```` fence, sometimes in an untagged fence, sometimes not at all.
//! This module turns such a reply into a parsed `serde_json::Value`, or into an
//! [`ExtractionError`] that says why it could not.
//!
//! # Extraction order
//!
//! 1. Empty or absent text fails with [`ExtractionError::EmptyResponse`].
//! 2. The first ```` ```json ```` fence up to the next ```` ``` ```` of either kind.
//! 3. Otherwise the first pair of generic ```` ``` ```` fences.
//! 4. Otherwise the whole text.
//!
//! Nested fences are not balanced. The candidate is trimmed and parsed as-is.
//!
//! # Example
//!
//! ```
//! use naa_scout::utils::json_extraction::{extract_json_from_response, PayloadShape};
//!
//! let reply = "Here you go:\n```json\n{\"headline\": \"X\"}\n```\nEnjoy!";
//! let value = extract_json_from_response(Some(reply), PayloadShape::Object).unwrap();
//! assert_eq!(value["headline"], "X");
//! ```

use serde_json::Value;

use crate::error::ExtractionError;

/// Marker that opens a JSON-tagged fenced block.
const JSON_FENCE: &str = "```json";

/// Marker for a generic fenced block (and for every closing fence).
const FENCE: &str = "```";

/// Number of characters kept from unparseable text for diagnostics.
pub const PREVIEW_CHARS: usize = 100;

/// Top-level JSON kind a caller expects from the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadShape {
    /// A single JSON object.
    Object,
    /// A JSON array (of objects, by convention).
    Array,
}

impl PayloadShape {
    /// Returns true if `value` has this top-level kind.
    pub fn matches(&self, value: &Value) -> bool {
        match self {
            PayloadShape::Object => value.is_object(),
            PayloadShape::Array => value.is_array(),
        }
    }

    fn describe(&self) -> &'static str {
        match self {
            PayloadShape::Object => "a JSON object",
            PayloadShape::Array => "a JSON array",
        }
    }
}

/// Returns the slice of `content` that should be handed to the JSON parser.
///
/// Applies the fence rules described in the module docs and trims the result.
/// A fence with no closing marker yields everything after the opening marker.
pub fn extract_candidate(content: &str) -> &str {
    if let Some(start) = content.find(JSON_FENCE) {
        let rest = &content[start + JSON_FENCE.len()..];
        return until_fence(rest).trim();
    }

    if let Some(start) = content.find(FENCE) {
        let rest = &content[start + FENCE.len()..];
        return until_fence(rest).trim();
    }

    content.trim()
}

fn until_fence(s: &str) -> &str {
    match s.find(FENCE) {
        Some(end) => &s[..end],
        None => s,
    }
}

/// Returns at most `max_chars` characters from the start of `text`.
pub fn preview(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

/// Extracts and parses the structured payload from a model reply.
///
/// # Errors
///
/// - [`ExtractionError::EmptyResponse`] if `content` is absent, empty, or only whitespace.
/// - [`ExtractionError::UnparseableResponse`] if the candidate is not valid JSON or its
///   top-level kind differs from `shape`. The error carries the first
///   [`PREVIEW_CHARS`] characters of the candidate.
pub fn extract_json_from_response(
    content: Option<&str>,
    shape: PayloadShape,
) -> Result<Value, ExtractionError> {
    let content = match content {
        Some(text) if !text.trim().is_empty() => text,
        _ => return Err(ExtractionError::EmptyResponse),
    };

    let candidate = extract_candidate(content);

    let value: Value =
        serde_json::from_str(candidate).map_err(|e| ExtractionError::UnparseableResponse {
            preview: preview(candidate, PREVIEW_CHARS),
            reason: e.to_string(),
        })?;

    if !shape.matches(&value) {
        return Err(ExtractionError::UnparseableResponse {
            preview: preview(candidate, PREVIEW_CHARS),
            reason: format!("expected {}", shape.describe()),
        });
    }

    Ok(value)
}
