//! Best-effort format detection for captured payloads.

use crate::types::history::PayloadFormat;

/// Classifies raw text as JSON or XML. Total — never fails.
///
/// Checks, in order: JSON bracket pairs, XML declaration or tag shape,
/// then a strict JSON parse. Anything that survives none of these is
/// classified as XML, so empty or whitespace-only input lands on XML —
/// an arbitrary but deterministic default.
pub fn detect_format(text: &str) -> PayloadFormat {
    let trimmed = text.trim();

    if (trimmed.starts_with('{') && trimmed.ends_with('}'))
        || (trimmed.starts_with('[') && trimmed.ends_with(']'))
    {
        return PayloadFormat::Json;
    }

    if trimmed.starts_with("<?xml") || (trimmed.starts_with('<') && trimmed.contains('>')) {
        return PayloadFormat::Xml;
    }

    match serde_json::from_str::<serde_json::Value>(trimmed) {
        Ok(_) => PayloadFormat::Json,
        Err(_) => PayloadFormat::Xml,
    }
}
