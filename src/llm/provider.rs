//! Provider-neutral request/response types and the `LlmProvider` trait.
//!
//! The scout depends only on this seam; the concrete HTTP client lives in
//! [`crate::llm::providers`]. Tests substitute their own implementations.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::LlmError;

/// A message in a conversation with an LLM.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Role of the message sender (`user` for the scout's single prompt).
    pub role: String,
    /// Content of the message.
    pub content: String,
}

impl Message {
    /// Create a new user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// Request for text generation from an LLM.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// Model identifier to use for generation. Empty means provider default.
    pub model: String,
    /// Conversation messages.
    pub messages: Vec<Message>,
    /// Enable the provider's hosted web-search grounding tool.
    #[serde(default)]
    pub web_search: bool,
}

impl GenerationRequest {
    /// Create a new generation request with default parameters.
    pub fn new(model: impl Into<String>, messages: Vec<Message>) -> Self {
        Self {
            model: model.into(),
            messages,
            web_search: false,
        }
    }

    /// Enable or disable web-search grounding for this request.
    pub fn with_web_search(mut self, enabled: bool) -> Self {
        self.web_search = enabled;
        self
    }
}

/// Response from an LLM generation request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenerationResponse {
    /// Model (or model version) that produced this response.
    pub model: String,
    /// Concatenated text of the first candidate, if the model returned any.
    pub text: Option<String>,
    /// Reason the generation stopped (e.g. "STOP", "MAX_TOKENS").
    pub finish_reason: Option<String>,
    /// Token usage statistics, when reported.
    pub usage: Option<Usage>,
    /// Web pages the answer was grounded on.
    #[serde(default)]
    pub sources: Vec<GroundingSource>,
}

impl GenerationResponse {
    /// Get the generated text, if available.
    pub fn first_content(&self) -> Option<&str> {
        self.text.as_deref()
    }
}

/// Token usage statistics for a generation request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Usage {
    /// Number of tokens in the prompt.
    pub prompt_tokens: u32,
    /// Number of tokens generated.
    pub completion_tokens: u32,
    /// Total tokens used.
    pub total_tokens: u32,
}

/// A web source cited by search grounding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroundingSource {
    pub uri: String,
    pub title: Option<String>,
}

/// Trait for LLM providers that can generate text.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Generate a response for the given request.
    async fn generate(&self, request: GenerationRequest) -> Result<GenerationResponse, LlmError>;
}
