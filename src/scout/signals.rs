//! News signals extracted from the model's reply.
//!
//! The payload is kept as the exact `serde_json::Value` the model produced so the
//! output file carries every key it sent. [`NewsSignal`] is a read-only view
//! built with lenient accessors: a missing or non-string field becomes an empty
//! value instead of an error, since search-grounded output is often partial.

use serde_json::Value;

use super::Variant;

/// One headline the model picked, with its source and why it matters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewsSignal {
    /// Digest category; absent for the single-headline variant.
    pub category: Option<String>,
    pub headline: String,
    pub url: String,
    pub reason: String,
}

impl NewsSignal {
    /// Builds a signal from any JSON value using lenient field access.
    ///
    /// Non-object values yield an all-empty signal.
    pub fn from_value(value: &Value) -> Self {
        Self {
            category: optional_str(value, "category"),
            headline: str_or_empty(value, "headline"),
            url: str_or_empty(value, "url"),
            reason: str_or_empty(value, "reason"),
        }
    }

    /// Category label, or the empty string when absent.
    pub fn category_or_empty(&self) -> &str {
        self.category.as_deref().unwrap_or_default()
    }
}

/// Reads a string field, resolving missing or non-string values to `""`.
pub fn str_or_empty(value: &Value, key: &str) -> String {
    value
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

/// Reads a string field, resolving missing or non-string values to `None`.
pub fn optional_str(value: &Value, key: &str) -> Option<String> {
    value.get(key).and_then(Value::as_str).map(str::to_string)
}

/// Parsed result of one scan, tagged with the variant that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoutPayload {
    variant: Variant,
    value: Value,
}

impl ScoutPayload {
    /// Wraps an already-extracted JSON value.
    pub fn new(variant: Variant, value: Value) -> Self {
        Self { variant, value }
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    /// The JSON exactly as extracted; this is what gets written to disk.
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Signals in payload order. An object payload yields one signal.
    pub fn signals(&self) -> Vec<NewsSignal> {
        match &self.value {
            Value::Array(items) => items.iter().map(NewsSignal::from_value).collect(),
            other => vec![NewsSignal::from_value(other)],
        }
    }

    /// Number of top-level entries (array length, or 1 for an object).
    pub fn len(&self) -> usize {
        match &self.value {
            Value::Array(items) => items.len(),
            _ => 1,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Truncates `text` to at most `max_chars` characters.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
