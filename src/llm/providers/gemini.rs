//! Google Gemini provider.
//!
//! Talks to the `generateContent` REST endpoint and can attach the hosted
//! `google_search` tool so the model grounds its answer on live web results.
//! One request per call: no retries, and no timeout beyond reqwest's defaults.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::config::{mask_secret, ScoutConfig};
use crate::error::LlmError;
use crate::llm::{GenerationRequest, GenerationResponse, GroundingSource, LlmProvider, Usage};

/// Google's status string for quota exhaustion.
const RESOURCE_EXHAUSTED: &str = "RESOURCE_EXHAUSTED";

/// Gemini provider for LLM requests.
pub struct GeminiProvider {
    /// HTTP client for making API requests.
    client: Client,
    /// API key sent as `x-goog-api-key`.
    api_key: String,
    /// Base URL for the Gemini API.
    base_url: String,
    /// Default model to use when none is specified.
    default_model: String,
}

impl GeminiProvider {
    /// Create a new Gemini provider with custom base URL.
    ///
    /// Useful for testing or for Gemini-compatible proxies.
    pub fn with_custom_url(api_key: String, base_url: String, model: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            default_model: model,
        }
    }

    /// Create a provider from a run configuration.
    pub fn from_config(config: &ScoutConfig) -> Self {
        Self::with_custom_url(
            config.api_key.clone(),
            config.api_base.clone(),
            config.model.clone(),
        )
    }

    /// Get the API key (for debugging, returns masked value).
    pub fn api_key_masked(&self) -> String {
        mask_secret(&self.api_key)
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Get the default model.
    pub fn default_model(&self) -> &str {
        &self.default_model
    }

    /// Full `generateContent` URL for a model.
    fn endpoint(&self, model: &str) -> String {
        let model = model.strip_prefix("models/").unwrap_or(model);
        format!("{}/models/{}:generateContent", self.base_url, model)
    }

    /// Execute a single request.
    async fn execute_request(
        &self,
        url: &str,
        request: &ApiRequest,
    ) -> Result<GenerationResponse, LlmError> {
        let http_response = self
            .client
            .post(url)
            .header("Content-Type", "application/json")
            .header("x-goog-api-key", &self.api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| LlmError::RequestFailed(e.to_string()))?;

        let status = http_response.status();

        if !status.is_success() {
            let status_code = status.as_u16();
            let error_text = http_response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read error response".to_string());

            return Err(api_error(status_code, &error_text));
        }

        let api_response: ApiResponse = http_response
            .json()
            .await
            .map_err(|e| LlmError::ParseError(format!("Failed to parse API response: {}", e)))?;

        Ok(api_response.into_generation_response())
    }
}

/// Maps a non-2xx response to an `LlmError`.
fn api_error(status_code: u16, body: &str) -> LlmError {
    match serde_json::from_str::<ApiErrorResponse>(body) {
        Ok(error_response) => {
            let detail = error_response.error;
            let exhausted = detail.status.as_deref() == Some(RESOURCE_EXHAUSTED);
            if status_code == 429 || exhausted {
                LlmError::RateLimited(detail.message)
            } else {
                LlmError::ApiError {
                    code: status_code,
                    message: detail.message,
                }
            }
        }
        Err(_) if status_code == 429 => LlmError::RateLimited(body.to_string()),
        Err(_) => LlmError::ApiError {
            code: status_code,
            message: body.to_string(),
        },
    }
}

#[async_trait]
impl LlmProvider for GeminiProvider {
    async fn generate(&self, request: GenerationRequest) -> Result<GenerationResponse, LlmError> {
        let model = if request.model.is_empty() {
            self.default_model.clone()
        } else {
            request.model.clone()
        };

        let api_request = ApiRequest::from_generation_request(&request);
        let url = self.endpoint(&model);

        tracing::debug!(
            model = %model,
            web_search = request.web_search,
            key = %self.api_key_masked(),
            "Sending Gemini generateContent request"
        );

        let mut response = self.execute_request(&url, &api_request).await?;
        if response.model.is_empty() {
            response.model = model;
        }
        Ok(response)
    }
}

/// Internal request structure for `generateContent`.
#[derive(Debug, Clone, Serialize)]
struct ApiRequest {
    contents: Vec<ApiContent>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tools: Vec<ApiTool>,
}

impl ApiRequest {
    fn from_generation_request(request: &GenerationRequest) -> Self {
        let contents = request
            .messages
            .iter()
            .map(|message| ApiContent {
                role: Some(message.role.clone()),
                parts: vec![ApiPart {
                    text: Some(message.content.clone()),
                    thought: None,
                }],
            })
            .collect();

        let tools = if request.web_search {
            vec![ApiTool {
                google_search: GoogleSearch {},
            }]
        } else {
            Vec::new()
        };

        Self { contents, tools }
    }
}

/// Content block shared by requests and responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ApiContent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<ApiPart>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ApiPart {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    /// Set on thinking-model reasoning parts, which are not part of the answer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    thought: Option<bool>,
}

#[derive(Debug, Clone, Serialize)]
struct ApiTool {
    google_search: GoogleSearch,
}

#[derive(Debug, Clone, Serialize)]
struct GoogleSearch {}

/// Internal response structure from `generateContent`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiResponse {
    #[serde(default)]
    candidates: Vec<ApiCandidate>,
    usage_metadata: Option<ApiUsage>,
    model_version: Option<String>,
}

impl ApiResponse {
    fn into_generation_response(self) -> GenerationResponse {
        let usage = self.usage_metadata.map(|u| Usage {
            prompt_tokens: u.prompt_token_count,
            completion_tokens: u.candidates_token_count,
            total_tokens: u.total_token_count,
        });

        let Some(candidate) = self.candidates.into_iter().next() else {
            return GenerationResponse {
                model: self.model_version.unwrap_or_default(),
                usage,
                ..Default::default()
            };
        };

        let text: String = candidate
            .content
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .filter(|part| part.thought != Some(true))
                    .filter_map(|part| part.text)
                    .collect()
            })
            .unwrap_or_default();

        let sources = candidate
            .grounding_metadata
            .map(|meta| {
                meta.grounding_chunks
                    .into_iter()
                    .filter_map(|chunk| chunk.web)
                    .filter_map(|web| {
                        web.uri.map(|uri| GroundingSource {
                            uri,
                            title: web.title,
                        })
                    })
                    .collect()
            })
            .unwrap_or_default();

        GenerationResponse {
            model: self.model_version.unwrap_or_default(),
            text: if text.is_empty() { None } else { Some(text) },
            finish_reason: candidate.finish_reason,
            usage,
            sources,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiCandidate {
    content: Option<ApiContent>,
    finish_reason: Option<String>,
    grounding_metadata: Option<ApiGroundingMetadata>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiUsage {
    #[serde(default)]
    prompt_token_count: u32,
    #[serde(default)]
    candidates_token_count: u32,
    #[serde(default)]
    total_token_count: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiGroundingMetadata {
    #[serde(default)]
    grounding_chunks: Vec<ApiGroundingChunk>,
}

#[derive(Debug, Deserialize)]
struct ApiGroundingChunk {
    web: Option<ApiWebChunk>,
}

#[derive(Debug, Deserialize)]
struct ApiWebChunk {
    uri: Option<String>,
    title: Option<String>,
}

/// Error response from the API.
#[derive(Debug, Deserialize)]
struct ApiErrorResponse {
    error: ApiErrorDetail,
}

/// Error detail from the API.
#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: String,
    status: Option<String>,
}
