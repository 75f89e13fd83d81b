//! Unit tests for the format detector.
//!
//! The detector is total: every input classifies as JSON or XML, with XML
//! as the deterministic fallback for unparseable text.

use snipstash::services::detector::detect_format;
use snipstash::types::history::PayloadFormat;

#[test]
fn test_object_and_array_classify_as_json() {
    assert_eq!(detect_format(r#"{"a": 1}"#), PayloadFormat::Json);
    assert_eq!(detect_format("[1, 2, 3]"), PayloadFormat::Json);
    assert_eq!(detect_format("  {\"a\": 1}  \n"), PayloadFormat::Json);
}

#[test]
fn test_xml_declaration_classifies_as_xml() {
    assert_eq!(
        detect_format(r#"<?xml version="1.0"?><root/>"#),
        PayloadFormat::Xml
    );
}

#[test]
fn test_tag_shape_classifies_as_xml() {
    assert_eq!(detect_format("<root><child/></root>"), PayloadFormat::Xml);
    assert_eq!(detect_format("<a>text</a>"), PayloadFormat::Xml);
}

#[test]
fn test_bare_json_scalars_fall_through_to_parse() {
    // No bracket pair, no tag shape — step 3 strict parse decides.
    assert_eq!(detect_format("42"), PayloadFormat::Json);
    assert_eq!(detect_format("null"), PayloadFormat::Json);
    assert_eq!(detect_format("\"quoted\""), PayloadFormat::Json);
}

#[test]
fn test_empty_input_defaults_to_xml() {
    assert_eq!(detect_format(""), PayloadFormat::Xml);
    assert_eq!(detect_format("   \t\n"), PayloadFormat::Xml);
}

#[test]
fn test_plain_text_defaults_to_xml() {
    assert_eq!(detect_format("hello world"), PayloadFormat::Xml);
}

#[test]
fn test_lone_angle_bracket_without_close_is_not_xml_shaped() {
    // Starts with '<' but contains no '>' — falls through to the JSON
    // parse, which fails, landing on the XML default anyway.
    assert_eq!(detect_format("<incomplete"), PayloadFormat::Xml);
}

#[test]
fn test_truncated_object_is_not_bracket_matched() {
    // Starts with '{' but does not end with '}' — decided by the parse.
    assert_eq!(detect_format("{\"a\": 1"), PayloadFormat::Xml);
}
