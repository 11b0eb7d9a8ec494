//! Rich fragments: the content model of one chapter
//!
//! A fragment is a tree of text runs and style-tagged spans, with room for the
//! markup the style system does not understand (paragraphs, headings, comments,
//! line breaks ...). It converts to and from the HTML-like markup string stored in
//! a chapter.
//!
//! # Node kinds
//!
//! | Markup                                  | Node               | Offsets                 |
//! |-----------------------------------------|--------------------|-------------------------|
//! | character data                          | [`Node::Text`]     | one per character       |
//! | `<span class="KEY">` (single valid key)  | [`Node::Span`]     | sum of children         |
//! | any other HTML element                  | [`Node::Element`]  | sum of children         |
//! | comments, void/raw-text/foreign elements | [`Node::Raw`]      | zero                    |
//!
//! Offsets count Unicode scalar values of visible text in document order.
//!
//! # Normalization
//!
//! [`RichFragment::normalize`] is the merge pass. It runs after parsing and after every
//! toggle, so a fragment obtained from this crate never has empty text runs, empty
//! spans, adjacent text runs, or two adjacent spans sharing a style key. Elements are
//! never fused.

mod parser;
mod serializer;

pub use parser::parse;
pub use serializer::{escape_attribute, escape_text, serialize};

use crate::style::StyleKey;
use serde::{Deserialize, Serialize};

/// Immutable unstyled text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextRun(String);

impl TextRun {
    pub fn new(text: impl Into<String>) -> Self {
        TextRun(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Length in characters.
    pub fn len(&self) -> usize {
        self.0.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Split at a character offset.
    pub(crate) fn split_at(&self, offset: usize) -> (TextRun, TextRun) {
        let byte = self
            .0
            .char_indices()
            .nth(offset)
            .map(|(idx, _)| idx)
            .unwrap_or(self.0.len());
        let (left, right) = self.0.split_at(byte);
        (TextRun::new(left), TextRun::new(right))
    }

    fn concat(&self, other: &TextRun) -> TextRun {
        TextRun(format!("{}{}", self.0, other.0))
    }
}

/// A run of nodes tagged with one named style
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyledSpan {
    pub style_key: StyleKey,
    pub children: Vec<Node>,
}

impl StyledSpan {
    pub fn new(style_key: StyleKey, children: Vec<Node>) -> Self {
        StyledSpan {
            style_key,
            children,
        }
    }
}

/// Markup outside the style system that still contains addressable text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub tag: String,
    pub attrs: Vec<(String, String)>,
    pub children: Vec<Node>,
}

impl Element {
    /// Value of the `class` attribute, if any.
    pub fn class(&self) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(name, _)| name == "class")
            .map(|(_, value)| value.as_str())
    }
}

/// One node of a fragment
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Text(TextRun),
    Span(StyledSpan),
    Element(Element),
    /// Opaque markup kept verbatim; carries no addressable text
    Raw(String),
}

impl Node {
    pub fn text(text: impl Into<String>) -> Self {
        Node::Text(TextRun::new(text))
    }

    pub fn span(style_key: StyleKey, children: Vec<Node>) -> Self {
        Node::Span(StyledSpan::new(style_key, children))
    }

    /// Number of addressable characters under this node.
    pub fn text_len(&self) -> usize {
        match self {
            Node::Text(run) => run.len(),
            Node::Span(span) => nodes_text_len(&span.children),
            Node::Element(element) => nodes_text_len(&element.children),
            Node::Raw(_) => 0,
        }
    }

    fn push_plain_text(&self, out: &mut String) {
        match self {
            Node::Text(run) => out.push_str(run.as_str()),
            Node::Span(span) => span.children.iter().for_each(|c| c.push_plain_text(out)),
            Node::Element(element) => element
                .children
                .iter()
                .for_each(|c| c.push_plain_text(out)),
            Node::Raw(_) => {}
        }
    }

    /// Empty text runs and childless spans are dropped by the merge pass.
    fn is_vacant(&self) -> bool {
        match self {
            Node::Text(run) => run.is_empty(),
            Node::Span(span) => span.children.is_empty(),
            Node::Element(_) | Node::Raw(_) => false,
        }
    }
}

pub(crate) fn nodes_text_len(nodes: &[Node]) -> usize {
    nodes.iter().map(Node::text_len).sum()
}

/// The rich-text body of one chapter
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RichFragment {
    pub nodes: Vec<Node>,
}

impl RichFragment {
    /// Build a fragment from nodes, running the merge pass.
    pub fn new(nodes: Vec<Node>) -> Self {
        RichFragment {
            nodes: normalize_nodes(nodes),
        }
    }

    /// Parse a markup string. Never fails: unknown markup is kept as opaque nodes.
    pub fn parse(markup: &str) -> Self {
        parse(markup)
    }

    /// Serialize back to a markup string.
    pub fn to_markup(&self) -> String {
        serialize(self)
    }

    /// Total number of addressable characters.
    pub fn text_len(&self) -> usize {
        nodes_text_len(&self.nodes)
    }

    /// Visible text with all markup stripped.
    pub fn plain_text(&self) -> String {
        let mut out = String::new();
        self.nodes.iter().for_each(|n| n.push_plain_text(&mut out));
        out
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Run the merge pass in place.
    pub fn normalize(&mut self) {
        let nodes = std::mem::take(&mut self.nodes);
        self.nodes = normalize_nodes(nodes);
    }

    /// Walk every sibling list (the root list first) in depth-first order.
    pub fn visit_sibling_lists<F: FnMut(&[Node])>(&self, mut visit: F) {
        fn walk<F: FnMut(&[Node])>(nodes: &[Node], visit: &mut F) {
            visit(nodes);
            for node in nodes {
                match node {
                    Node::Span(span) => walk(&span.children, visit),
                    Node::Element(element) => walk(&element.children, visit),
                    Node::Text(_) | Node::Raw(_) => {}
                }
            }
        }
        walk(&self.nodes, &mut visit);
    }

    /// Character ranges `(key, start, end)` of every styled span, in document order.
    pub fn span_ranges(&self) -> Vec<(StyleKey, usize, usize)> {
        fn walk(nodes: &[Node], offset: &mut usize, out: &mut Vec<(StyleKey, usize, usize)>) {
            for node in nodes {
                match node {
                    Node::Text(run) => *offset += run.len(),
                    Node::Span(span) => {
                        let start = *offset;
                        walk(&span.children, offset, out);
                        out.push((span.style_key.clone(), start, *offset));
                    }
                    Node::Element(element) => walk(&element.children, offset, out),
                    Node::Raw(_) => {}
                }
            }
        }
        let mut out = Vec::new();
        let mut offset = 0;
        walk(&self.nodes, &mut offset, &mut out);
        out.sort_by_key(|(_, start, end)| (*start, std::cmp::Reverse(*end)));
        out
    }
}

/// The merge pass over one sibling list (recursing into children first).
pub(crate) fn normalize_nodes(nodes: Vec<Node>) -> Vec<Node> {
    let mut out: Vec<Node> = Vec::with_capacity(nodes.len());
    for node in nodes {
        let node = match node {
            Node::Span(span) => Node::Span(StyledSpan {
                style_key: span.style_key,
                children: normalize_nodes(span.children),
            }),
            Node::Element(element) => Node::Element(Element {
                children: normalize_nodes(element.children),
                ..element
            }),
            other => other,
        };
        if node.is_vacant() {
            continue;
        }

        let mergeable = match (out.last(), &node) {
            (Some(Node::Text(_)), Node::Text(_)) => true,
            (Some(Node::Span(last)), Node::Span(span)) => last.style_key == span.style_key,
            _ => false,
        };
        if !mergeable {
            out.push(node);
            continue;
        }

        match (out.last_mut(), node) {
            (Some(Node::Text(last)), Node::Text(run)) => {
                *last = last.concat(&run);
            }
            (Some(Node::Span(last)), Node::Span(span)) => {
                let mut children = std::mem::take(&mut last.children);
                children.extend(span.children);
                last.children = normalize_nodes(children);
            }
            _ => {}
        }
    }
    out
}

impl From<&str> for RichFragment {
    fn from(markup: &str) -> Self {
        RichFragment::parse(markup)
    }
}

impl From<String> for RichFragment {
    fn from(markup: String) -> Self {
        RichFragment::parse(&markup)
    }
}

impl From<RichFragment> for String {
    fn from(fragment: RichFragment) -> Self {
        fragment.to_markup()
    }
}

impl Serialize for RichFragment {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_markup())
    }
}

impl<'de> Deserialize<'de> for RichFragment {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let markup = String::deserialize(deserializer)?;
        Ok(RichFragment::parse(&markup))
    }
}
