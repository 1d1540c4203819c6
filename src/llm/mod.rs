//! LLM integration for naa-scout.
//!
//! The scout talks to a single hosted model through the [`LlmProvider`]
//! trait. [`GeminiProvider`] is the production implementation; it enables
//! Google Search grounding when a request asks for web search.
//!
//! ```ignore
//! use naa_scout::config::ScoutConfig;
//! use naa_scout::llm::{GeminiProvider, GenerationRequest, LlmProvider, Message};
//!
//! let provider = GeminiProvider::from_config(&ScoutConfig::new(api_key));
//! let request = GenerationRequest::new("", vec![Message::user("What happened today?")])
//!     .with_web_search(true);
//! let response = provider.generate(request).await?;
//! println!("{}", response.first_content().unwrap_or_default());
//! ```

pub mod provider;
pub mod providers;

pub use provider::{
    GenerationRequest, GenerationResponse, GroundingSource, LlmProvider, Message, Usage,
};
pub use providers::GeminiProvider;
