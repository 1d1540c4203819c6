//! naa-scout: search-grounded news scouting.
//!
//! Asks a hosted LLM with web search enabled for the most impactful recent
//! headlines, extracts the JSON from its free-text reply, and writes it to a
//! local file.

pub mod cli;
pub mod config;
pub mod error;
pub mod llm;
pub mod scout;
pub mod utils;

// Re-export commonly used error types
pub use error::{ConfigError, ExtractionError, LlmError, OutputError};
