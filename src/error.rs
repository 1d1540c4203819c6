//! Error types for naa-scout operations.
//!
//! Defines error types for each subsystem:
//! - Configuration and credential resolution
//! - Upstream LLM API interactions
//! - JSON extraction from model replies
//! - Writing the output file

use thiserror::Error;

/// Errors that can occur while resolving configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The credential environment variable is not set (or is blank).
    #[error("Missing API key: {0} environment variable not set")]
    MissingCredential(String),

    /// Configuration validation failed.
    #[error("Configuration validation failed: {0}")]
    ValidationFailed(String),
}

/// Errors that can occur during LLM operations.
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP request failed: {0}")]
    RequestFailed(String),

    #[error("Failed to parse LLM response: {0}")]
    ParseError(String),

    #[error("Rate limited: {0}")]
    RateLimited(String),

    #[error("API error ({code}): {message}")]
    ApiError { code: u16, message: String },
}

/// Errors produced when turning a model reply into a structured payload.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ExtractionError {
    /// The model returned no text at all.
    #[error("LLM returned an empty response")]
    EmptyResponse,

    /// The candidate text did not parse into the expected JSON shape.
    #[error("LLM returned non-JSON text ({reason}): {preview}")]
    UnparseableResponse { preview: String, reason: String },
}

/// Errors that can occur while persisting the payload.
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to write '{path}': {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Serialized output is not valid UTF-8: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),
}
