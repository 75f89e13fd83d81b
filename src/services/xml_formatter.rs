//! XML pretty-printing.
//!
//! Parses the input with `roxmltree` and re-emits it with 2-space
//! indentation, newline separators, and collapsed content: an element whose
//! only child is text stays on a single line. Comments and processing
//! instructions are preserved; the XML declaration is re-emitted when the
//! input carries one. DOCTYPE internal subsets are not re-emitted.

use roxmltree::{Attribute, Document, Node, NodeType};

use crate::types::errors::FormatError;

const INDENT: &str = "  ";
const XML_NS_URI: &str = "http://www.w3.org/XML/1998/namespace";

/// Pretty-prints an XML document.
///
/// # Errors
/// Returns `FormatError::InvalidXml` carrying the underlying parse error
/// message when the input is not well-formed XML.
pub fn format_xml(text: &str) -> Result<String, FormatError> {
    let doc = Document::parse(text).map_err(|e| FormatError::InvalidXml(e.to_string()))?;

    let mut out = String::new();
    if let Some(decl) = declaration(text) {
        out.push_str(decl);
        out.push('\n');
    }
    for child in doc.root().children() {
        write_node(&mut out, child, 0);
    }
    if out.ends_with('\n') {
        out.pop();
    }
    Ok(out)
}

/// Returns the verbatim `<?xml ...?>` declaration if the input starts with one.
///
/// The target must be exactly `xml`: a leading instruction such as
/// `<?xml-stylesheet ...?>` is an ordinary PI node, re-emitted by
/// [`write_node`] instead.
fn declaration(text: &str) -> Option<&str> {
    let trimmed = text.trim_start();
    let rest = trimmed.strip_prefix("<?xml")?;
    if !rest.starts_with(|c: char| c.is_whitespace() || c == '?') {
        return None;
    }
    trimmed.find("?>").map(|end| &trimmed[..end + 2])
}

fn push_indent(out: &mut String, depth: usize) {
    for _ in 0..depth {
        out.push_str(INDENT);
    }
}

fn write_node(out: &mut String, node: Node, depth: usize) {
    match node.node_type() {
        NodeType::Element => write_element(out, node, depth),
        NodeType::Comment => {
            push_indent(out, depth);
            out.push_str("<!--");
            out.push_str(node.text().unwrap_or(""));
            out.push_str("-->\n");
        }
        NodeType::PI => {
            if let Some(pi) = node.pi() {
                push_indent(out, depth);
                out.push_str("<?");
                out.push_str(pi.target);
                if let Some(value) = pi.value {
                    out.push(' ');
                    out.push_str(value);
                }
                out.push_str("?>\n");
            }
        }
        NodeType::Text => {
            let content = node.text().unwrap_or("").trim();
            if !content.is_empty() {
                push_indent(out, depth);
                out.push_str(&escape_text(content));
                out.push('\n');
            }
        }
        NodeType::Root => {}
    }
}

fn write_element(out: &mut String, node: Node, depth: usize) {
    let name = qualified_name(&node);

    push_indent(out, depth);
    out.push('<');
    out.push_str(&name);
    write_namespace_decls(out, &node);
    for attr in node.attributes() {
        out.push(' ');
        out.push_str(&attribute_name(&node, &attr));
        out.push_str("=\"");
        out.push_str(&escape_attr(attr.value()));
        out.push('"');
    }

    let children: Vec<Node> = node.children().filter(is_significant).collect();
    if children.is_empty() {
        out.push_str("/>\n");
    } else if children.len() == 1 && children[0].is_text() {
        // Collapsed content: text-only elements stay on one line.
        out.push('>');
        out.push_str(&escape_text(children[0].text().unwrap_or("").trim()));
        out.push_str("</");
        out.push_str(&name);
        out.push_str(">\n");
    } else {
        out.push_str(">\n");
        for child in children {
            write_node(out, child, depth + 1);
        }
        push_indent(out, depth);
        out.push_str("</");
        out.push_str(&name);
        out.push_str(">\n");
    }
}

/// Whitespace-only text nodes carry no content and are dropped.
fn is_significant(node: &Node) -> bool {
    match node.node_type() {
        NodeType::Text => node.text().map(|t| !t.trim().is_empty()).unwrap_or(false),
        NodeType::Element | NodeType::Comment | NodeType::PI => true,
        NodeType::Root => false,
    }
}

fn qualified_name(node: &Node) -> String {
    let tag = node.tag_name();
    match tag.namespace().and_then(|uri| node.lookup_prefix(uri)) {
        Some(prefix) if !prefix.is_empty() => format!("{}:{}", prefix, tag.name()),
        _ => tag.name().to_string(),
    }
}

fn attribute_name(node: &Node, attr: &Attribute) -> String {
    match attr.namespace().and_then(|uri| node.lookup_prefix(uri)) {
        Some(prefix) if !prefix.is_empty() => format!("{}:{}", prefix, attr.name()),
        _ => attr.name().to_string(),
    }
}

/// Emits xmlns declarations for namespaces that enter scope at this element.
fn write_namespace_decls(out: &mut String, node: &Node) {
    let parent_scope: Vec<(Option<&str>, &str)> = node
        .parent()
        .filter(|p| p.is_element())
        .map(|p| p.namespaces().map(|ns| (ns.name(), ns.uri())).collect())
        .unwrap_or_default();

    for ns in node.namespaces() {
        if ns.uri() == XML_NS_URI {
            continue;
        }
        if parent_scope
            .iter()
            .any(|(name, uri)| *name == ns.name() && *uri == ns.uri())
        {
            continue;
        }
        match ns.name() {
            Some(prefix) => {
                out.push_str(" xmlns:");
                out.push_str(prefix);
            }
            None => out.push_str(" xmlns"),
        }
        out.push_str("=\"");
        out.push_str(&escape_attr(ns.uri()));
        out.push('"');
    }
}

fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn escape_attr(value: &str) -> String {
    escape_text(value).replace('"', "&quot;")
}
