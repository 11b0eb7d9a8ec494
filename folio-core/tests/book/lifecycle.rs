//! Chapter lifecycle and style operations on the book aggregate

use folio_core::book::{FIRST_CHAPTER_PLACEHOLDER, NEW_CHAPTER_PLACEHOLDER};
use folio_core::{Book, BookError, ChapterId, RichFragment, Selection};
use proptest::prelude::*;

fn ids(book: &Book) -> Vec<ChapterId> {
    book.chapters().iter().map(|chapter| chapter.id).collect()
}

fn titles(book: &Book) -> Vec<&str> {
    book.chapters()
        .iter()
        .map(|chapter| chapter.title.as_str())
        .collect()
}

#[test]
fn test_add_delete_add_scenario() {
    let mut book = Book::default();
    book.rename_chapter(1, "Intro").unwrap();

    let second = book.add_chapter();
    assert_eq!(second, 2);
    assert_eq!(titles(&book), vec!["Intro", "Chapter 2"]);

    assert!(book.delete_chapter(1).unwrap());
    assert_eq!(ids(&book), vec![2]);

    assert_eq!(book.add_chapter(), 3);
    assert_eq!(ids(&book), vec![2, 3]);
    assert_eq!(titles(&book), vec!["Chapter 2", "Chapter 2"]);
}

#[test]
fn test_ids_increase_across_many_operations() {
    let mut book = Book::default();
    let mut last = 1;
    for round in 0..10 {
        let id = book.add_chapter();
        assert!(id > last);
        last = id;
        if round % 3 == 0 {
            book.delete_chapter(id).unwrap();
        }
    }
    assert!(!book.chapters().is_empty());
    assert_eq!(book.next_chapter_id(), last + 1);
}

#[test]
fn test_book_is_never_empty() {
    let mut book = Book::default();
    let second = book.add_chapter();
    assert!(book.delete_chapter(1).unwrap());
    assert!(!book.delete_chapter(second).unwrap());
    assert_eq!(ids(&book), vec![second]);
}

#[test]
fn test_placeholders() {
    let mut book = Book::default();
    let id = book.add_chapter();
    assert_eq!(book.chapter(1).unwrap().content.to_markup(), FIRST_CHAPTER_PLACEHOLDER);
    assert_eq!(book.chapter(id).unwrap().content.to_markup(), NEW_CHAPTER_PLACEHOLDER);
}

#[test]
fn test_content_and_toggle_by_id() {
    let mut book = Book::default();
    book.set_chapter_content(1, RichFragment::parse("<p>Hello world</p>"))
        .unwrap();
    book.toggle_style(1, Selection::new(6, 5), "quote").unwrap();
    assert_eq!(
        book.chapter(1).unwrap().content.to_markup(),
        "<p>Hello <span class=\"quote\">world</span></p>"
    );

    assert_eq!(
        book.toggle_style(42, Selection::new(0, 1), "quote"),
        Err(BookError::ChapterNotFound(42))
    );
}

#[test]
fn test_style_override_and_reset() {
    let mut book = Book::default();
    book.set_style("quote", "font-style: normal;").unwrap();
    assert_eq!(
        book.styles().get("quote").unwrap().declarations,
        "font-style: normal;"
    );

    assert!(book.reset_style("quote").unwrap());
    assert!(book
        .styles()
        .get("quote")
        .unwrap()
        .declarations
        .contains("font-style: italic;"));

    assert_eq!(
        book.set_style("Quote!", "color: red;"),
        Err(BookError::StyleKeyInvalid("Quote!".to_string()))
    );
}

#[test]
fn test_insert_every_semantic_block() {
    let mut book = Book::default();
    let keys = book.styles().list_keys();
    for key in keys {
        book.insert_style_block(1, &key).unwrap();
    }
    let markup = book.chapter(1).unwrap().content.to_markup();
    for tag in [
        "<h1 class=\"chapter-title\">",
        "<h2 class=\"section-title\">",
        "<p class=\"paragraph\">",
        "<div class=\"highlight-box\">",
        "<pre class=\"code-block\">",
        "<blockquote class=\"quote\">",
    ] {
        assert!(markup.contains(tag), "missing {tag} in {markup}");
    }
}

#[derive(Debug, Clone)]
enum ChapterOp {
    Add,
    Delete(usize),
}

fn chapter_op() -> impl Strategy<Value = ChapterOp> {
    prop_oneof![
        Just(ChapterOp::Add),
        (0usize..16).prop_map(ChapterOp::Delete),
    ]
}

proptest! {
    #[test]
    fn prop_chapter_ids_strictly_increase(ops in prop::collection::vec(chapter_op(), 0..40)) {
        let mut book = Book::default();
        let mut last_assigned = 1;

        for op in ops {
            match op {
                ChapterOp::Add => {
                    let id = book.add_chapter();
                    prop_assert!(id > last_assigned, "{} after {}", id, last_assigned);
                    last_assigned = id;
                }
                ChapterOp::Delete(pick) => {
                    let count = book.chapters().len();
                    let id = book.chapters()[pick % count].id;
                    prop_assert_eq!(book.delete_chapter(id).unwrap(), count > 1);
                }
            }

            prop_assert!(!book.chapters().is_empty());
            prop_assert!(book.next_chapter_id() > last_assigned);
            let current = ids(&book);
            let mut sorted = current.clone();
            sorted.sort_unstable();
            sorted.dedup();
            prop_assert_eq!(sorted, current);
        }
    }
}
