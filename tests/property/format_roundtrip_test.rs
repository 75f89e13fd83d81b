//! Property-based tests for format detection and pretty-printing.
//!
//! Verifies the detector classifies every JSON-parseable document as JSON
//! and every tag-shaped document as XML, and that both formatters are
//! fixed points of their own output.

use proptest::prelude::*;
use snipstash::services::detector::detect_format;
use snipstash::services::json_formatter::format_json;
use snipstash::services::xml_formatter::format_xml;
use snipstash::types::history::PayloadFormat;

/// Strategy for arbitrary JSON values of bounded depth.
fn arb_json() -> impl Strategy<Value = serde_json::Value> {
    let leaf = prop_oneof![
        Just(serde_json::Value::Null),
        any::<bool>().prop_map(serde_json::Value::from),
        any::<i64>().prop_map(serde_json::Value::from),
        "[a-zA-Z0-9 _-]{0,12}".prop_map(serde_json::Value::from),
    ];
    leaf.prop_recursive(3, 24, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(serde_json::Value::from),
            prop::collection::hash_map("[a-z]{1,8}", inner, 0..6)
                .prop_map(|m| serde_json::Value::from_iter(m)),
        ]
    })
}

/// Strategy for simple well-formed XML documents.
fn arb_xml() -> impl Strategy<Value = String> {
    (
        "[a-z]{1,8}",
        prop::collection::vec(("[a-z]{1,8}", "[a-zA-Z0-9 ]{0,10}"), 0..5),
    )
        .prop_map(|(root, children)| {
            let mut doc = format!("<{}>", root);
            for (tag, text) in children {
                doc.push_str(&format!("<{}>{}</{}>", tag, text.trim(), tag));
            }
            doc.push_str(&format!("</{}>", root));
            doc
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    // Every text that parses as JSON is classified as JSON.
    #[test]
    fn detector_classifies_parseable_json_as_json(value in arb_json()) {
        let text = serde_json::to_string(&value).unwrap();
        prop_assert_eq!(detect_format(&text), PayloadFormat::Json);
    }

    // Every tag-shaped document is classified as XML.
    #[test]
    fn detector_classifies_tag_shaped_text_as_xml(doc in arb_xml()) {
        prop_assert_eq!(detect_format(&doc), PayloadFormat::Xml);
    }

    // format_json(format_json(x)) == format_json(x)
    #[test]
    fn json_formatter_is_idempotent(value in arb_json()) {
        let text = serde_json::to_string(&value).unwrap();
        let once = format_json(&text).unwrap();
        let twice = format_json(&once).unwrap();
        prop_assert_eq!(once, twice);
    }

    // Pretty-printed JSON still parses back to the same value.
    #[test]
    fn json_formatter_preserves_value(value in arb_json()) {
        let text = serde_json::to_string(&value).unwrap();
        let formatted = format_json(&text).unwrap();
        let reparsed: serde_json::Value = serde_json::from_str(&formatted).unwrap();
        prop_assert_eq!(reparsed, value);
    }

    // format_xml(format_xml(x)) == format_xml(x)
    #[test]
    fn xml_formatter_is_idempotent(doc in arb_xml()) {
        let once = format_xml(&doc).unwrap();
        let twice = format_xml(&once).unwrap();
        prop_assert_eq!(once, twice);
    }
}
