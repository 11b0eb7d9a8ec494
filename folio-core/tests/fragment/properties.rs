//! Property tests: round trip, merge invariant and toggle idempotence

use folio_core::fragment::{escape_text, Node};
use folio_core::{toggle, toggle_with_mode, BookError, RichFragment, Selection, ToggleMode};
use proptest::prelude::*;

/// Well-nested phrasing markup built from text, line breaks, styled spans and
/// inline elements.
fn markup() -> impl Strategy<Value = String> {
    let leaf = prop_oneof![
        4 => "[a-z &<]{1,6}".prop_map(|text| escape_text(&text)),
        1 => Just("<br>".to_string()),
    ];
    leaf.prop_recursive(3, 24, 4, |inner| {
        let children = prop::collection::vec(inner, 1..4).prop_map(|parts| parts.concat());
        prop_oneof![
            children
                .clone()
                .prop_map(|c| format!("<span class=\"quote\">{c}</span>")),
            children
                .clone()
                .prop_map(|c| format!("<span class=\"highlight-box\">{c}</span>")),
            children.clone().prop_map(|c| format!("<b>{c}</b>")),
            children.clone().prop_map(|c| format!("<em>{c}</em>")),
            children,
        ]
    })
}

/// A selection inside `fragment`, or `None` when it has no text
fn selection(fragment: &RichFragment, a: usize, b: usize) -> Option<Selection> {
    let extent = fragment.text_len();
    if extent == 0 {
        return None;
    }
    let start = a % extent;
    let length = 1 + b % (extent - start);
    Some(Selection::new(start, length))
}

fn style_key() -> impl Strategy<Value = &'static str> {
    prop_oneof![Just("quote"), Just("highlight-box"), Just("code-block")]
}

fn assert_normalized(fragment: &RichFragment) -> Result<(), TestCaseError> {
    let mut violation = None;
    fragment.visit_sibling_lists(|nodes| {
        for pair in nodes.windows(2) {
            match (&pair[0], &pair[1]) {
                (Node::Text(_), Node::Text(_)) => violation = Some("adjacent text runs"),
                (Node::Span(a), Node::Span(b)) if a.style_key == b.style_key => {
                    violation = Some("adjacent spans with the same key")
                }
                _ => {}
            }
        }
        for node in nodes {
            match node {
                Node::Text(run) if run.is_empty() => violation = Some("empty text run"),
                Node::Span(span) if span.children.is_empty() => violation = Some("empty span"),
                _ => {}
            }
        }
    });
    prop_assert!(violation.is_none(), "{:?} in {}", violation, fragment.to_markup());
    Ok(())
}

fn assert_properly_nested(fragment: &RichFragment) -> Result<(), TestCaseError> {
    let ranges = fragment.span_ranges();
    for (i, (_, a_start, a_end)) in ranges.iter().enumerate() {
        for (_, b_start, b_end) in &ranges[i + 1..] {
            let disjoint = b_start >= a_end || b_end <= a_start;
            let nested = a_start <= b_start && b_end <= a_end;
            prop_assert!(disjoint || nested, "overlapping spans in {}", fragment.to_markup());
        }
    }
    Ok(())
}

proptest! {
    #[test]
    fn prop_round_trip_is_lossless(markup in markup()) {
        let fragment = RichFragment::parse(&markup);
        let again = RichFragment::parse(&fragment.to_markup());
        prop_assert_eq!(again, fragment);
    }

    #[test]
    fn prop_parsed_fragments_are_normalized(markup in markup()) {
        assert_normalized(&RichFragment::parse(&markup))?;
    }

    #[test]
    fn prop_toggle_twice_is_identity(
        markup in markup(),
        a in 0usize..64,
        b in 0usize..64,
        key in style_key(),
    ) {
        let fragment = RichFragment::parse(&markup);
        let Some(range) = selection(&fragment, a, b) else {
            return Ok(());
        };

        match toggle_with_mode(&fragment, range, key) {
            Ok((once, ToggleMode::Applied)) => {
                let twice = toggle(&once, range, key).unwrap();
                prop_assert_eq!(twice, fragment);
            }
            Ok((once, ToggleMode::Removed)) => {
                // Whatever a removal leaves behind, applying over it is undone exactly.
                if let Ok((twice, ToggleMode::Applied)) = toggle_with_mode(&once, range, key) {
                    let thrice = toggle(&twice, range, key).unwrap();
                    prop_assert_eq!(thrice, once);
                }
            }
            Err(BookError::MalformedMarkup(_)) => {}
            Err(other) => prop_assert!(false, "unexpected error {}", other),
        }
    }

    #[test]
    fn prop_toggle_keeps_invariants(
        markup in markup(),
        a in 0usize..64,
        b in 0usize..64,
        key in style_key(),
    ) {
        let fragment = RichFragment::parse(&markup);
        let Some(range) = selection(&fragment, a, b) else {
            return Ok(());
        };

        if let Ok(toggled) = toggle(&fragment, range, key) {
            prop_assert_eq!(toggled.plain_text(), fragment.plain_text());
            assert_normalized(&toggled)?;
            assert_properly_nested(&toggled)?;

            let reparsed = RichFragment::parse(&toggled.to_markup());
            prop_assert_eq!(reparsed, toggled);
        }
    }

    #[test]
    fn prop_toggle_sequences_keep_invariants(
        markup in markup(),
        steps in prop::collection::vec((0usize..64, 0usize..64, style_key()), 1..8),
    ) {
        let mut fragment = RichFragment::parse(&markup);
        let text = fragment.plain_text();

        for (a, b, key) in steps {
            let Some(range) = selection(&fragment, a, b) else {
                return Ok(());
            };
            match toggle(&fragment, range, key) {
                Ok(toggled) => fragment = toggled,
                Err(BookError::MalformedMarkup(_)) => continue,
                Err(other) => prop_assert!(false, "unexpected error {}", other),
            }

            prop_assert_eq!(fragment.plain_text(), text.clone());
            assert_normalized(&fragment)?;
            assert_properly_nested(&fragment)?;
            prop_assert_eq!(RichFragment::parse(&fragment.to_markup()), fragment.clone());
        }
    }
}
