//! Toggle engine tests on whole chapters

use folio_core::{toggle, toggle_markup, BookError, RichFragment, Selection};
use insta::assert_snapshot;

const CHAPTER: &str = "<h1 class=\"chapter-title\">Intro</h1><p>The quick brown fox.</p><p>Jumps over the dog.</p>";

#[test]
fn test_hello_world_scenario() {
    let styled = toggle_markup("Hello world", Selection::new(0, 5), "highlight-box").unwrap();
    assert_eq!(styled, "<span class=\"highlight-box\">Hello</span> world");

    let plain = toggle_markup(&styled, Selection::new(0, 5), "highlight-box").unwrap();
    assert_eq!(plain, "Hello world");
}

#[test]
fn test_toggle_inside_second_paragraph() {
    // "Intro" (5) + "The quick brown fox." (20) puts "Jumps" at 25.
    let styled = toggle_markup(CHAPTER, Selection::new(25, 5), "quote").unwrap();
    assert_snapshot!(
        styled,
        @r###"<h1 class="chapter-title">Intro</h1><p>The quick brown fox.</p><p><span class="quote">Jumps</span> over the dog.</p>"###
    );
}

#[test]
fn test_selection_spanning_paragraphs_fails_cleanly() {
    let fragment = RichFragment::parse(CHAPTER);
    let result = toggle(&fragment, Selection::new(20, 10), "quote");
    assert!(matches!(result, Err(BookError::MalformedMarkup(_))));
    assert_eq!(fragment.to_markup(), CHAPTER);
}

#[test]
fn test_whole_paragraphs_can_be_wrapped() {
    let styled = toggle_markup(CHAPTER, Selection::new(5, 39), "highlight-box").unwrap();
    assert_eq!(
        styled,
        "<h1 class=\"chapter-title\">Intro</h1><span class=\"highlight-box\"><p>The quick brown fox.</p><p>Jumps over the dog.</p></span>"
    );
    let back = toggle_markup(&styled, Selection::new(5, 39), "highlight-box").unwrap();
    assert_eq!(back, CHAPTER);
}

#[test]
fn test_two_styles_overlapping_both_ways() {
    let original = "Hello brave new world";
    let a = toggle_markup(original, Selection::new(0, 11), "quote").unwrap();
    let b = toggle_markup(&a, Selection::new(6, 9), "highlight-box").unwrap();
    assert_eq!(
        b,
        "<span class=\"quote\">Hello </span><span class=\"highlight-box\"><span class=\"quote\">brave</span> new</span> world"
    );

    let c = toggle_markup(&b, Selection::new(6, 9), "highlight-box").unwrap();
    assert_eq!(c, a);
    let d = toggle_markup(&c, Selection::new(0, 11), "quote").unwrap();
    assert_eq!(d, original);
}

#[test]
fn test_partial_overlap_with_same_style_reverts() {
    let original = "<span class=\"quote\">Hello</span> world";
    let out = toggle_markup(original, Selection::new(2, 6), "quote").unwrap();
    assert_eq!(
        out,
        "<span class=\"quote\">He<span class=\"quote\">llo</span> wo</span>rld"
    );
    let back = toggle_markup(&out, Selection::new(2, 6), "quote").unwrap();
    assert_eq!(back, original);
}

#[test]
fn test_inner_span_of_same_style_is_kept() {
    let original = "<p>a<span class=\"quote\">b</span>c</p>";
    let once = toggle_markup(original, Selection::new(0, 3), "quote").unwrap();
    let twice = toggle_markup(&once, Selection::new(0, 3), "quote").unwrap();
    assert_eq!(twice, original);
}

#[test]
fn test_part_of_wrapped_paragraphs_can_be_unstyled() {
    let styled = toggle_markup(
        "<p>Hello world</p><p>Bye</p>",
        Selection::new(0, 14),
        "highlight-box",
    )
    .unwrap();
    assert_eq!(
        styled,
        "<span class=\"highlight-box\"><p>Hello world</p><p>Bye</p></span>"
    );

    let out = toggle_markup(&styled, Selection::new(0, 5), "highlight-box").unwrap();
    assert_snapshot!(
        out,
        @r###"<p>Hello<span class="highlight-box"> world</span></p><p><span class="highlight-box">Bye</span></p>"###
    );
}

#[test]
fn test_removing_middle_of_span_splits_it() {
    let out = toggle_markup(
        "<span class=\"quote\">Hello world</span>",
        Selection::new(4, 3),
        "quote",
    )
    .unwrap();
    assert_eq!(
        out,
        "<span class=\"quote\">Hell</span>o w<span class=\"quote\">orld</span>"
    );
}

#[test]
fn test_errors() {
    let fragment = RichFragment::parse("Hello");
    assert_eq!(
        toggle(&fragment, Selection::new(0, 0), "quote"),
        Err(BookError::EmptySelection)
    );
    assert_eq!(
        toggle(&fragment, Selection::new(5, 1), "quote"),
        Err(BookError::RangeOutOfBounds {
            start: 5,
            length: 1,
            extent: 5
        })
    );
    assert_eq!(
        toggle(&fragment, Selection::new(0, 1), "Quote"),
        Err(BookError::StyleKeyInvalid("Quote".to_string()))
    );
}

#[test]
fn test_custom_keys_can_be_toggled() {
    let out = toggle_markup("aside text", Selection::new(0, 5), "margin-note").unwrap();
    assert_eq!(out, "<span class=\"margin-note\">aside</span> text");
}
