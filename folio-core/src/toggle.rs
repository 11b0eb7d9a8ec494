//! Selection-scoped style toggling
//!
//! [`toggle`] applies or removes one style over a character range of a fragment and
//! returns a new fragment. The input is never modified, so a failed toggle leaves the
//! caller's content exactly as it was.
//!
//! # Algorithm
//!
//! 1. Descend from the root through every element, and every span of a *different*
//!    style, that fully contains the selection. The sibling list reached is the host.
//!    Descent stops at a span of the toggled style: that span has to be cut in its
//!    parent's list. When cutting it would split an element inside it, the span is
//!    first pushed down into that element's children and descent goes on.
//! 2. Split the host's children at both selection boundaries. Text runs and styled
//!    spans split in two (spans recursively); an element cannot be split, so a
//!    selection crossing an element boundary fails with
//!    [`BookError::MalformedMarkup`]. Zero-width nodes sitting on a boundary stay
//!    outside the selection.
//! 3. If every selected character is already under the style, unwrap the outermost
//!    span of that style on every path through the selected nodes (removal).
//!    Otherwise wrap the selected nodes, unchanged, in one new span (application).
//! 4. Run the merge pass over the whole fragment.
//!
//! Splitting a span produces two spans with the same style on either side of the
//! boundary, so nesting survives a partial overlap. The merge pass fuses them again
//! once the new span is removed, which makes apply-then-remove an exact inverse,
//! including when the selection already held spans of the toggled style.

use crate::error::BookError;
use crate::fragment::{Node, RichFragment, StyledSpan};
use crate::style::StyleKey;
use serde::{Deserialize, Serialize};

/// A character range reported by the editing surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub start: usize,
    pub length: usize,
}

impl Selection {
    pub fn new(start: usize, length: usize) -> Self {
        Selection { start, length }
    }

    /// Exclusive end offset, or `None` on overflow.
    pub fn end(&self) -> Option<usize> {
        self.start.checked_add(self.length)
    }
}

/// What a toggle did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleMode {
    Applied,
    Removed,
}

/// Apply or remove `style_key` over `selection`
pub fn toggle(
    fragment: &RichFragment,
    selection: Selection,
    style_key: &str,
) -> Result<RichFragment, BookError> {
    toggle_with_mode(fragment, selection, style_key).map(|(fragment, _)| fragment)
}

/// Same as [`toggle`], also reporting which mode ran
pub fn toggle_with_mode(
    fragment: &RichFragment,
    selection: Selection,
    style_key: &str,
) -> Result<(RichFragment, ToggleMode), BookError> {
    if selection.length == 0 {
        return Err(BookError::EmptySelection);
    }

    let extent = fragment.text_len();
    let end = selection
        .end()
        .filter(|end| *end <= extent)
        .ok_or(BookError::RangeOutOfBounds {
            start: selection.start,
            length: selection.length,
            extent,
        })?;

    let key = StyleKey::parse(style_key)?;

    let mut nodes = fragment.nodes.clone();
    let mode = toggle_in(&mut nodes, selection.start, end, &key)?;
    log::debug!(
        "toggle '{key}' over {}..{end}: {mode:?}",
        selection.start
    );

    Ok((RichFragment::new(nodes), mode))
}

/// Toggle on serialized content: parse, toggle, serialize
pub fn toggle_markup(
    markup: &str,
    selection: Selection,
    style_key: &str,
) -> Result<String, BookError> {
    let fragment = RichFragment::parse(markup);
    toggle(&fragment, selection, style_key).map(|fragment| fragment.to_markup())
}

fn toggle_in(
    nodes: &mut Vec<Node>,
    start: usize,
    end: usize,
    key: &StyleKey,
) -> Result<ToggleMode, BookError> {
    let mut offset = 0;
    for i in 0..nodes.len() {
        let len = nodes[i].text_len();
        if offset <= start && end <= offset + len {
            let (inner_start, inner_end) = (start - offset, end - offset);
            let cuts_element = match &nodes[i] {
                Node::Span(span) if span.style_key == *key => {
                    element_straddles(&span.children, inner_start)
                        || element_straddles(&span.children, inner_end)
                }
                _ => false,
            };
            if cuts_element {
                if let Node::Span(span) = nodes.remove(i) {
                    nodes.splice(i..i, push_down(span.children, key));
                }
                return toggle_in(nodes, start, end, key);
            }

            match &mut nodes[i] {
                Node::Element(element) => {
                    return toggle_in(&mut element.children, inner_start, inner_end, key);
                }
                Node::Span(span) if span.style_key != *key => {
                    return toggle_in(&mut span.children, inner_start, inner_end, key);
                }
                _ => break,
            }
        }
        offset += len;
        if offset >= end {
            break;
        }
    }

    toggle_host(nodes, start, end, key)
}

fn toggle_host(
    nodes: &mut Vec<Node>,
    start: usize,
    end: usize,
    key: &StyleKey,
) -> Result<ToggleMode, BookError> {
    let (before, rest) = split_nodes(std::mem::take(nodes), start, true)?;
    let (middle, after) = split_nodes(rest, end - start, false)?;

    let (middle, mode) = if middle.iter().all(|node| covered_by(node, key)) {
        (unwrap_outermost(middle, key), ToggleMode::Removed)
    } else {
        let span = Node::Span(StyledSpan::new(key.clone(), middle));
        (vec![span], ToggleMode::Applied)
    };

    nodes.extend(before);
    nodes.extend(middle);
    nodes.extend(after);
    Ok(mode)
}

/// Whether offset `pos` falls strictly inside an element, looking through spans.
fn element_straddles(nodes: &[Node], pos: usize) -> bool {
    let mut offset = 0;
    for node in nodes {
        let len = node.text_len();
        if offset < pos && pos < offset + len {
            return match node {
                Node::Element(_) => true,
                Node::Span(span) => element_straddles(&span.children, pos - offset),
                Node::Text(_) | Node::Raw(_) => false,
            };
        }
        offset += len;
    }
    false
}

/// Move a span of `key` one level down: `<k><p>A</p>B</k>` becomes
/// `<p><k>A</k></p><k>B</k>`.
fn push_down(children: Vec<Node>, key: &StyleKey) -> Vec<Node> {
    children
        .into_iter()
        .map(|child| match child {
            Node::Element(mut element) => {
                let inner = std::mem::take(&mut element.children);
                element.children = vec![Node::Span(StyledSpan::new(key.clone(), inner))];
                Node::Element(element)
            }
            Node::Span(mut span) if span.style_key != *key => {
                let inner = std::mem::take(&mut span.children);
                span.children = vec![Node::Span(StyledSpan::new(key.clone(), inner))];
                Node::Span(span)
            }
            other => Node::Span(StyledSpan::new(key.clone(), vec![other])),
        })
        .collect()
}

/// Partition a sibling list at character offset `pos`, splitting the node that
/// straddles it. Zero-width nodes exactly at `pos` go left when `zero_width_left`.
fn split_nodes(
    nodes: Vec<Node>,
    pos: usize,
    zero_width_left: bool,
) -> Result<(Vec<Node>, Vec<Node>), BookError> {
    let mut left = Vec::new();
    let mut right = Vec::new();
    let mut offset = 0;

    for node in nodes {
        let len = node.text_len();
        let node_end = offset + len;

        if node_end < pos || (node_end == pos && (len > 0 || zero_width_left)) {
            left.push(node);
        } else if offset >= pos {
            right.push(node);
        } else {
            let (l, r) = split_node(node, pos - offset)?;
            left.push(l);
            right.push(r);
        }
        offset = node_end;
    }

    Ok((left, right))
}

/// Split one node at a character offset strictly inside it.
fn split_node(node: Node, at: usize) -> Result<(Node, Node), BookError> {
    match node {
        Node::Text(run) => {
            let (left, right) = run.split_at(at);
            Ok((Node::Text(left), Node::Text(right)))
        }
        Node::Span(span) => {
            let (left, right) = split_nodes(span.children, at, true)?;
            Ok((
                Node::Span(StyledSpan::new(span.style_key.clone(), left)),
                Node::Span(StyledSpan::new(span.style_key, right)),
            ))
        }
        Node::Element(element) => Err(BookError::MalformedMarkup(format!(
            "selection crosses the boundary of <{}>",
            element.tag
        ))),
        Node::Raw(raw) => Err(BookError::MalformedMarkup(format!(
            "cannot split opaque markup {raw}"
        ))),
    }
}

/// Whether every character under `node` is styled with `key`.
fn covered_by(node: &Node, key: &StyleKey) -> bool {
    match node {
        Node::Text(run) => run.is_empty(),
        Node::Raw(_) => true,
        Node::Span(span) => {
            span.style_key == *key || span.children.iter().all(|c| covered_by(c, key))
        }
        Node::Element(element) => element.children.iter().all(|c| covered_by(c, key)),
    }
}

/// Remove the outermost span of `key` on every path, promoting its children.
/// Spans of `key` nested inside it stay.
fn unwrap_outermost(nodes: Vec<Node>, key: &StyleKey) -> Vec<Node> {
    let mut out = Vec::with_capacity(nodes.len());
    for node in nodes {
        match node {
            Node::Span(span) if span.style_key == *key => out.extend(span.children),
            Node::Span(span) => out.push(Node::Span(StyledSpan::new(
                span.style_key,
                unwrap_outermost(span.children, key),
            ))),
            Node::Element(mut element) => {
                element.children = unwrap_outermost(element.children, key);
                out.push(Node::Element(element));
            }
            other => out.push(other),
        }
    }
    out
}
