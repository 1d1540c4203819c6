//! The scan run: one grounded request, extraction, console summary, file write.
//!
//! Every failure is returned as a [`ScoutFailure`] whose `Display` is the line
//! shown to the user. Nothing is retried and nothing is written unless
//! extraction succeeded.

use std::path::PathBuf;
use std::sync::{Arc, LazyLock};

use regex::Regex;
use thiserror::Error;
use tracing::{debug, info};

use super::output::write_json;
use super::signals::{truncate_chars, ScoutPayload};
use super::Variant;
use crate::config::ScoutConfig;
use crate::error::{ConfigError, ExtractionError, LlmError, OutputError};
use crate::llm::{GenerationRequest, LlmProvider, Message};
use crate::utils::extract_json_from_response;

/// Headlines are cut to this many characters in the digest summary.
const SUMMARY_HEADLINE_CHARS: usize = 50;

/// Best-effort rate-limit indicators in upstream error text.
static RATE_LIMIT_PATTERN: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"(?i)\b429\b|resource[_ ]exhausted|rate[- ]?limit|too many requests|quota").ok()
});

/// Why a scan produced no output file.
#[derive(Debug, Error, PartialEq)]
pub enum ScoutFailure {
    #[error("ERROR: Run 'export {var}=your_key' first.")]
    MissingCredential { var: String },

    #[error("ERROR: Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("CRITICAL: AI returned an empty response. Possible API throttling or Search timeout.")]
    EmptyResponse,

    #[error("DEBUG: AI returned non-JSON text: {preview}...")]
    UnparseableResponse { preview: String },

    #[error(
        "RATE LIMITED: {message}\n\
         Suggestion: wait about a minute before re-running, or pass --model with a model \
         that still has free-tier quota (e.g. gemini-2.0-flash)."
    )]
    RateLimited { message: String },

    #[error("Agent Encountered Error: {message}")]
    OtherUpstreamFailure { message: String },
}

impl ScoutFailure {
    /// Short machine-friendly name for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            ScoutFailure::MissingCredential { .. } => "missing_credential",
            ScoutFailure::InvalidConfiguration(_) => "invalid_configuration",
            ScoutFailure::EmptyResponse => "empty_response",
            ScoutFailure::UnparseableResponse { .. } => "unparseable_response",
            ScoutFailure::RateLimited { .. } => "rate_limited",
            ScoutFailure::OtherUpstreamFailure { .. } => "upstream_failure",
        }
    }
}

impl From<ConfigError> for ScoutFailure {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::MissingCredential(var) => ScoutFailure::MissingCredential { var },
            ConfigError::ValidationFailed(msg) => ScoutFailure::InvalidConfiguration(msg),
        }
    }
}

impl From<ExtractionError> for ScoutFailure {
    fn from(err: ExtractionError) -> Self {
        match err {
            ExtractionError::EmptyResponse => ScoutFailure::EmptyResponse,
            ExtractionError::UnparseableResponse { preview, .. } => {
                ScoutFailure::UnparseableResponse { preview }
            }
        }
    }
}

impl From<LlmError> for ScoutFailure {
    fn from(err: LlmError) -> Self {
        classify_llm_error(&err)
    }
}

impl From<OutputError> for ScoutFailure {
    fn from(err: OutputError) -> Self {
        ScoutFailure::OtherUpstreamFailure {
            message: err.to_string(),
        }
    }
}

/// Returns true if the text looks like a rate-limit or quota error.
///
/// Substring matching on error text is inherently fragile; treat a `false`
/// as "unknown", not as "definitely not throttled".
pub fn is_rate_limit_text(text: &str) -> bool {
    RATE_LIMIT_PATTERN
        .as_ref()
        .is_some_and(|re| re.is_match(text))
}

/// Maps an upstream error to a failure kind.
pub fn classify_llm_error(err: &LlmError) -> ScoutFailure {
    match err {
        LlmError::RateLimited(message) => ScoutFailure::RateLimited {
            message: message.clone(),
        },
        other => {
            let message = other.to_string();
            if is_rate_limit_text(&message) {
                ScoutFailure::RateLimited { message }
            } else {
                ScoutFailure::OtherUpstreamFailure { message }
            }
        }
    }
}

/// Console lines summarising a payload.
pub fn render_summary(payload: &ScoutPayload) -> Vec<String> {
    let signals = payload.signals();

    match payload.variant() {
        Variant::Digest => {
            let mut lines = vec![format!(
                "\n[TOP SIGNALS DETECTED: {} Categories]",
                payload.len()
            )];
            lines.extend(signals.iter().map(|signal| {
                format!(
                    "-> {}: {}...",
                    signal.category_or_empty(),
                    truncate_chars(&signal.headline, SUMMARY_HEADLINE_CHARS)
                )
            }));
            lines
        }
        Variant::Headline => {
            let mut lines = vec!["\n[TOP SIGNAL DETECTED]".to_string()];
            for signal in &signals {
                lines.push(format!("-> {}", signal.headline));
                lines.push(format!("   {}", signal.url));
                lines.push(format!("   {}", signal.reason));
            }
            lines
        }
    }
}

/// Outcome of a successful run.
#[derive(Debug, Clone)]
pub struct ScoutReport {
    pub payload: ScoutPayload,
    pub output_path: PathBuf,
}

/// Runs one scan against an LLM provider.
pub struct Scout {
    provider: Arc<dyn LlmProvider>,
    config: ScoutConfig,
}

impl Scout {
    pub fn new(provider: Arc<dyn LlmProvider>, config: ScoutConfig) -> Self {
        Self { provider, config }
    }

    pub fn config(&self) -> &ScoutConfig {
        &self.config
    }

    /// The single grounded request sent for the configured variant.
    pub fn build_request(&self) -> GenerationRequest {
        GenerationRequest::new(
            self.config.model.clone(),
            vec![Message::user(self.config.variant.prompt())],
        )
        .with_web_search(true)
    }

    /// Sends the request and extracts the payload. Writes nothing.
    pub async fn scan(&self) -> Result<ScoutPayload, ScoutFailure> {
        let variant = self.config.variant;
        info!(model = %self.config.model, variant = %variant, "Starting scan");

        let response = self.provider.generate(self.build_request()).await?;

        if let Some(usage) = &response.usage {
            debug!(
                prompt_tokens = usage.prompt_tokens,
                completion_tokens = usage.completion_tokens,
                total_tokens = usage.total_tokens,
                "Token usage"
            );
        }
        info!(
            model = %response.model,
            finish_reason = response.finish_reason.as_deref().unwrap_or("unknown"),
            sources = response.sources.len(),
            "Received response"
        );

        let value = extract_json_from_response(response.first_content(), variant.shape())?;
        Ok(ScoutPayload::new(variant, value))
    }

    /// Full run: announce, scan, print the summary, write the output file.
    pub async fn run(&self) -> Result<ScoutReport, ScoutFailure> {
        println!(
            "NAA Agent: Scanning using {} + Search...",
            self.config.model
        );

        let payload = self.scan().await?;

        for line in render_summary(&payload) {
            println!("{}", line);
        }

        write_json(&self.config.output_path, payload.value())?;
        println!(
            "\nSuccess: {} updated.",
            self.config.output_path.display()
        );

        Ok(ScoutReport {
            payload,
            output_path: self.config.output_path.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_rate_limit_text_detection() {
        assert!(is_rate_limit_text("API error (429): slow down"));
        assert!(is_rate_limit_text("status: RESOURCE_EXHAUSTED"));
        assert!(is_rate_limit_text("You exceeded your current quota"));
        assert!(is_rate_limit_text("Rate limit reached for model"));
        assert!(!is_rate_limit_text("API error (400): API key not valid"));
        assert!(!is_rate_limit_text("connection refused on port 14290"));
    }

    #[test]
    fn test_classify_typed_rate_limit() {
        let failure = classify_llm_error(&LlmError::RateLimited("Quota exceeded".to_string()));
        assert_eq!(
            failure,
            ScoutFailure::RateLimited {
                message: "Quota exceeded".to_string()
            }
        );
    }

    #[test]
    fn test_classify_rate_limit_from_text() {
        let failure = classify_llm_error(&LlmError::ApiError {
            code: 403,
            message: "RESOURCE_EXHAUSTED".to_string(),
        });
        assert_eq!(failure.kind(), "rate_limited");
    }

    #[test]
    fn test_classify_other_failure() {
        let failure = classify_llm_error(&LlmError::RequestFailed("dns error".to_string()));
        assert_eq!(failure.kind(), "upstream_failure");
        assert!(failure.to_string().starts_with("Agent Encountered Error:"));
    }

    #[test]
    fn test_failure_messages() {
        let missing = ScoutFailure::from(ConfigError::MissingCredential(
            "GEMINI_API_KEY".to_string(),
        ));
        assert_eq!(
            missing.to_string(),
            "ERROR: Run 'export GEMINI_API_KEY=your_key' first."
        );

        let empty = ScoutFailure::from(ExtractionError::EmptyResponse);
        assert!(empty.to_string().starts_with("CRITICAL: AI returned an empty response"));

        let unparseable = ScoutFailure::from(ExtractionError::UnparseableResponse {
            preview: "N/A".to_string(),
            reason: "expected value".to_string(),
        });
        assert_eq!(
            unparseable.to_string(),
            "DEBUG: AI returned non-JSON text: N/A..."
        );

        let limited = ScoutFailure::RateLimited {
            message: "quota".to_string(),
        };
        assert!(limited.to_string().contains("Suggestion:"));
    }

    #[test]
    fn test_render_digest_summary() {
        let long = "x".repeat(80);
        let payload = ScoutPayload::new(
            Variant::Digest,
            json!([
                {"category": "AI & Robotics", "headline": long},
                {"headline": "No category"}
            ]),
        );

        let lines = render_summary(&payload);
        assert_eq!(lines[0], "\n[TOP SIGNALS DETECTED: 2 Categories]");
        assert_eq!(lines[1], format!("-> AI & Robotics: {}...", "x".repeat(50)));
        assert_eq!(lines[2], "-> : No category...");
    }

    #[test]
    fn test_render_headline_summary() {
        let payload = ScoutPayload::new(
            Variant::Headline,
            json!({"headline": "X", "url": "http://a", "reason": "Y"}),
        );

        let lines = render_summary(&payload);
        assert_eq!(
            lines,
            vec![
                "\n[TOP SIGNAL DETECTED]".to_string(),
                "-> X".to_string(),
                "   http://a".to_string(),
                "   Y".to_string(),
            ]
        );
    }
}
