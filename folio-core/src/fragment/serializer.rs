//! Markup serialization (fragment → markup string)
//!
//! Styled spans are written as `<span class="KEY">`, elements with their original
//! attributes in original order, raw nodes verbatim. Text is escaped so that parsing
//! the output yields the same characters.

use super::{Node, RichFragment};

/// Elements whose parser drops one newline right after the start tag.
const LEADING_NEWLINE_TAGS: &[&str] = &["pre", "listing"];

/// Serialize a fragment to markup
pub fn serialize(fragment: &RichFragment) -> String {
    let mut out = String::new();
    write_nodes(&fragment.nodes, &mut out);
    out
}

fn write_nodes(nodes: &[Node], out: &mut String) {
    for node in nodes {
        write_node(node, out);
    }
}

fn write_node(node: &Node, out: &mut String) {
    match node {
        Node::Text(run) => out.push_str(&escape_text(run.as_str())),

        Node::Span(span) => {
            out.push_str("<span class=\"");
            out.push_str(span.style_key.as_str());
            out.push_str("\">");
            write_nodes(&span.children, out);
            out.push_str("</span>");
        }

        Node::Element(element) => {
            out.push('<');
            out.push_str(&element.tag);
            for (name, value) in &element.attrs {
                out.push(' ');
                out.push_str(name);
                out.push_str("=\"");
                out.push_str(&escape_attribute(value));
                out.push('"');
            }
            out.push('>');

            if LEADING_NEWLINE_TAGS.contains(&element.tag.as_str()) {
                if let Some(Node::Text(run)) = element.children.first() {
                    if run.as_str().starts_with('\n') {
                        out.push('\n');
                    }
                }
            }

            write_nodes(&element.children, out);
            out.push_str("</");
            out.push_str(&element.tag);
            out.push('>');
        }

        Node::Raw(raw) => out.push_str(raw),
    }
}

/// Escape HTML special characters in text content
pub fn escape_text(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('\u{a0}', "&nbsp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Escape HTML special characters in a double-quoted attribute value
pub fn escape_attribute(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('\u{a0}', "&nbsp;")
        .replace('"', "&quot;")
}
