//! Scan variants: which prompt to send and which payload shape to expect.

use std::fmt;

use super::prompts::{build_digest_prompt, HEADLINE_PROMPT};
use crate::utils::PayloadShape;

/// One prompt/payload pairing of the scout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Variant {
    /// One headline per fixed category, returned as a JSON array.
    #[default]
    Digest,
    /// The single top headline, returned as a JSON object without `category`.
    Headline,
}

impl Variant {
    /// Prompt text sent to the model.
    pub fn prompt(&self) -> String {
        match self {
            Variant::Digest => build_digest_prompt(),
            Variant::Headline => HEADLINE_PROMPT.to_string(),
        }
    }

    /// Top-level JSON kind the extractor must see.
    pub fn shape(&self) -> PayloadShape {
        match self {
            Variant::Digest => PayloadShape::Array,
            Variant::Headline => PayloadShape::Object,
        }
    }

    /// Stable lowercase name, used in logs and as the CLI subcommand.
    pub fn as_str(&self) -> &'static str {
        match self {
            Variant::Digest => "digest",
            Variant::Headline => "headline",
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
