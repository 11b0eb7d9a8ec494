//! Markup parsing (markup string → fragment)
//!
//! Pipeline: markup → html5ever (RcDom) → fragment nodes → merge pass.
//!
//! The markup is wrapped in a minimal document so that html5ever's body insertion
//! mode applies, which is how contentEditable produced it in the first place. Broken
//! markup is repaired the way a browser would repair it; parsing never fails.

use super::{Element, Node, RichFragment};
use crate::style::{is_valid_key, StyleKey};
use html5ever::parse_document;
use html5ever::serialize::{serialize, SerializeOpts, TraversalScope};
use html5ever::tendril::TendrilSink;
use html5ever::{ns, ParseOpts};
use markup5ever_rcdom::{Handle, NodeData, RcDom, SerializableHandle};

/// Elements whose content is never addressable text: void elements and
/// raw-text/RCDATA containers. They are kept as verbatim markup.
const OPAQUE_TAGS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "keygen", "link", "meta",
    "param", "source", "track", "wbr", "iframe", "noembed", "noframes", "noscript",
    "plaintext", "script", "style", "template", "textarea", "title", "xmp",
];

/// Parse a chapter's markup into a normalized fragment
pub fn parse(markup: &str) -> RichFragment {
    let wrapped = format!("<!DOCTYPE html><html><head></head><body>{markup}</body></html>");
    let dom = parse_document(RcDom::default(), ParseOpts::default())
        .from_utf8()
        .one(wrapped.as_bytes());

    let nodes = match find_body(&dom.document) {
        Some(body) => convert_children(&body),
        None => Vec::new(),
    };
    RichFragment::new(nodes)
}

fn find_body(handle: &Handle) -> Option<Handle> {
    if let NodeData::Element { ref name, .. } = handle.data {
        if name.local.as_ref() == "body" {
            return Some(handle.clone());
        }
    }

    for child in handle.children.borrow().iter() {
        if let Some(found) = find_body(child) {
            return Some(found);
        }
    }

    None
}

fn convert_children(handle: &Handle) -> Vec<Node> {
    handle
        .children
        .borrow()
        .iter()
        .filter_map(convert_node)
        .collect()
}

fn convert_node(handle: &Handle) -> Option<Node> {
    match handle.data {
        NodeData::Text { ref contents } => Some(Node::text(contents.borrow().to_string())),

        NodeData::Comment { ref contents } => Some(Node::Raw(format!("<!--{contents}-->"))),

        NodeData::Element {
            ref name,
            ref attrs,
            ..
        } => {
            let tag = name.local.to_string();
            if name.ns != ns!(html) || OPAQUE_TAGS.contains(&tag.as_str()) {
                return Some(Node::Raw(serialize_handle(handle)));
            }

            let attrs: Vec<(String, String)> = attrs
                .borrow()
                .iter()
                .map(|attr| (attr.name.local.to_string(), attr.value.to_string()))
                .collect();
            let children = convert_children(handle);

            match span_style_key(&tag, &attrs) {
                Some(key) => Some(Node::span(key, children)),
                None => Some(Node::Element(Element {
                    tag,
                    attrs,
                    children,
                })),
            }
        }

        NodeData::Document | NodeData::Doctype { .. } | NodeData::ProcessingInstruction { .. } => {
            None
        }
    }
}

/// A `<span>` whose only attribute is a single class token that is a valid key.
fn span_style_key(tag: &str, attrs: &[(String, String)]) -> Option<StyleKey> {
    if tag != "span" {
        return None;
    }
    match attrs {
        [(name, value)] if name == "class" && is_valid_key(value.trim()) => {
            StyleKey::parse(value.trim()).ok()
        }
        _ => None,
    }
}

/// Serialize a node and its subtree back to markup
fn serialize_handle(handle: &Handle) -> String {
    let mut output = Vec::new();
    let opts = SerializeOpts {
        traversal_scope: TraversalScope::IncludeNode,
        ..Default::default()
    };

    let serializable = SerializableHandle::from(handle.clone());
    if let Err(err) = serialize(&mut output, &serializable, opts) {
        log::warn!("dropping markup that could not be serialized: {err}");
        return String::new();
    }

    String::from_utf8(output).unwrap_or_default()
}
