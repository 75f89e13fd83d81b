//! JSON pretty-printing.

use crate::types::errors::FormatError;

/// Parses the input as JSON and re-serializes it with 2-space indentation.
///
/// # Errors
/// Returns `FormatError::InvalidJson` carrying the underlying parse error
/// message when the input is not valid JSON (including empty input).
pub fn format_json(text: &str) -> Result<String, FormatError> {
    let parsed: serde_json::Value =
        serde_json::from_str(text).map_err(|e| FormatError::InvalidJson(e.to_string()))?;
    serde_json::to_string_pretty(&parsed).map_err(|e| FormatError::InvalidJson(e.to_string()))
}
