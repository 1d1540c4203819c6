//! Shared utility functions for naa-scout.
//!
//! This module provides JSON extraction from LLM responses.

pub mod json_extraction;

pub use json_extraction::{
    extract_candidate, extract_json_from_response, preview, PayloadShape, PREVIEW_CHARS,
};
