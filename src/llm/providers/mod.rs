//! Concrete LLM provider implementations.

pub mod gemini;

pub use gemini::GeminiProvider;

// Re-export the main LlmProvider trait for convenience
pub use super::provider::LlmProvider;
