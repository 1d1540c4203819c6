//! Persisting the extracted payload.
//!
//! The output file is UTF-8 JSON, pretty-printed with four-space indentation,
//! created or truncated on every successful run.

use std::fs;
use std::path::Path;

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::Serializer;

use crate::error::OutputError;

const INDENT: &[u8] = b"    ";

/// Serializes `value` as JSON with four-space indentation.
pub fn to_pretty_json<T: Serialize + ?Sized>(value: &T) -> Result<String, OutputError> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(INDENT);
    let mut serializer = Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut serializer)?;
    Ok(String::from_utf8(buf)?)
}

/// Writes `value` to `path`, replacing any previous contents.
pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), OutputError> {
    let json = to_pretty_json(value)?;
    fs::write(path, json).map_err(|source| OutputError::Write {
        path: path.display().to_string(),
        source,
    })?;
    tracing::debug!(path = %path.display(), "Wrote output file");
    Ok(())
}
