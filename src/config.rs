//! Run configuration for the scout.
//!
//! Everything a run needs (credential, model, endpoint, output path, variant)
//! lives in one explicitly constructed [`ScoutConfig`] that is passed to the
//! provider and the runner. Nothing is read from process-wide state after it
//! has been built. The CLI feeds [`ScoutConfig::from_lookup`] with its flags
//! layered over the environment, so both sources resolve the same way.

use std::fmt;
use std::path::PathBuf;

use crate::error::ConfigError;
use crate::scout::Variant;

/// Environment variable holding the Gemini API key.
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Environment variable overriding the model identifier.
pub const MODEL_ENV: &str = "GEMINI_MODEL";

/// Environment variable overriding the API base URL.
pub const API_BASE_ENV: &str = "GEMINI_API_BASE";

/// Default model: Flash-Lite is the free-tier standard with search grounding.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash-lite";

/// Default Gemini REST endpoint.
pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Default output file, overwritten on every successful run.
pub const DEFAULT_OUTPUT_PATH: &str = "top_news.json";

/// Configuration for a single scout run.
#[derive(Clone)]
pub struct ScoutConfig {
    /// API key sent to the upstream service.
    pub api_key: String,
    /// Model identifier (e.g. `gemini-2.5-flash-lite`).
    pub model: String,
    /// Base URL of the generation API.
    pub api_base: String,
    /// File the extracted payload is written to.
    pub output_path: PathBuf,
    /// Which prompt/payload pair to run.
    pub variant: Variant,
}

impl ScoutConfig {
    /// Creates a configuration with default values and the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            api_base: DEFAULT_API_BASE.to_string(),
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            variant: Variant::default(),
        }
    }

    /// Builds configuration from a key lookup, usually the process environment.
    ///
    /// # Environment Variables
    ///
    /// - `GEMINI_API_KEY`: API key (required)
    /// - `GEMINI_MODEL`: Model identifier (default: gemini-2.5-flash-lite)
    /// - `GEMINI_API_BASE`: API base URL (default: Gemini v1beta endpoint)
    ///
    /// Blank values are treated as unset, so an exported-but-empty
    /// `GEMINI_MODEL` falls back to the default model.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingCredential` if the API key is missing or
    /// blank, and `ConfigError::ValidationFailed` for unusable values.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = resolve_api_key(lookup(API_KEY_ENV))?;
        let mut config = Self::new(api_key);

        if let Some(model) = lookup(MODEL_ENV).filter(|v| !v.trim().is_empty()) {
            config.model = model.trim().to_string();
        }

        if let Some(base) = lookup(API_BASE_ENV).filter(|v| !v.trim().is_empty()) {
            config.api_base = base.trim().to_string();
        }

        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ValidationFailed` if any values are invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api_key.trim().is_empty() {
            return Err(ConfigError::MissingCredential(API_KEY_ENV.to_string()));
        }

        if self.model.trim().is_empty() {
            return Err(ConfigError::ValidationFailed(
                "model cannot be empty".to_string(),
            ));
        }

        if !(self.api_base.starts_with("http://") || self.api_base.starts_with("https://")) {
            return Err(ConfigError::ValidationFailed(format!(
                "api_base must be an http(s) URL, got '{}'",
                self.api_base
            )));
        }

        if self.output_path.as_os_str().is_empty() {
            return Err(ConfigError::ValidationFailed(
                "output_path cannot be empty".to_string(),
            ));
        }

        Ok(())
    }

    /// Builder method to set the model.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Builder method to set the API base URL.
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    /// Builder method to set the output path.
    pub fn with_output_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_path = path.into();
        self
    }

    /// Builder method to set the variant.
    pub fn with_variant(mut self, variant: Variant) -> Self {
        self.variant = variant;
        self
    }

    /// Get the API key (for debugging, returns masked value).
    pub fn api_key_masked(&self) -> String {
        mask_secret(&self.api_key)
    }
}

impl fmt::Debug for ScoutConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScoutConfig")
            .field("api_key", &self.api_key_masked())
            .field("model", &self.model)
            .field("api_base", &self.api_base)
            .field("output_path", &self.output_path)
            .field("variant", &self.variant)
            .finish()
    }
}

/// Resolves the credential, treating blank values as missing.
///
/// # Errors
///
/// Returns `ConfigError::MissingCredential` naming `GEMINI_API_KEY`.
fn resolve_api_key(value: Option<String>) -> Result<String, ConfigError> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ConfigError::MissingCredential(API_KEY_ENV.to_string()))
}

/// Masks all but the first and last four characters of a secret.
pub(crate) fn mask_secret(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    if chars.len() <= 8 {
        "*".repeat(chars.len())
    } else {
        let head: String = chars[..4].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{}...{}", head, tail)
    }
}
