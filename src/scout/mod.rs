//! The news scout: prompt variants, signal model, run loop and output file.
//!
//! - [`prompts`] - Fixed prompts and the digest category table
//! - [`variant`] - Prompt/payload-shape pairing for each scan mode
//! - [`signals`] - `NewsSignal` and the extracted `ScoutPayload`
//! - [`output`] - Pretty-printed JSON writer for the output file
//! - [`runner`] - One request, extraction, summary and write; failure taxonomy

pub mod output;
pub mod prompts;
pub mod runner;
pub mod signals;
pub mod variant;

pub use output::{to_pretty_json, write_json};
pub use prompts::{build_digest_prompt, DigestCategory, DIGEST_CATEGORIES, HEADLINE_PROMPT};
pub use runner::{
    classify_llm_error, is_rate_limit_text, render_summary, Scout, ScoutFailure, ScoutReport,
};
pub use signals::{NewsSignal, ScoutPayload};
pub use variant::Variant;
