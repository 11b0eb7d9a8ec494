//! JSON image and the persistence collaborator

use folio_core::book::MAX_CHAPTER_ID;
use folio_core::{Book, BookError, BookStore, MemoryStore, Selection};

#[test]
fn test_saved_book_loads_back() {
    let mut book = Book::new("Saved");
    let id = book.add_chapter();
    book.rename_chapter(id, "Second").unwrap();
    book.toggle_style(1, Selection::new(0, 5), "highlight-box")
        .unwrap();
    book.set_style("aside", "color: gray;").unwrap();

    let store = MemoryStore::new();
    store.save_book(&book).unwrap();
    assert_eq!(store.load_book().unwrap(), Some(book));
}

#[test]
fn test_json_field_names() {
    let json = Book::new("Fields").to_json().unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(value["title"], "Fields");
    assert_eq!(value["chapters"][0]["id"], 1);
    assert_eq!(value["chapters"][0]["title"], "Chapter 1");
    assert_eq!(
        value["chapters"][0]["content"],
        "<p>Start writing your book here...</p>"
    );
    assert_eq!(value["nextChapterId"], 2);
    assert!(value["styles"].as_object().unwrap().is_empty());
}

#[test]
fn test_book_saved_by_first_editor_version_loads() {
    let json = r#"{
        "title": "Untitled Book",
        "chapters": [
            { "id": 1, "title": "Chapter 1", "content": "<p>Start writing your book here...</p>" },
            { "id": 2, "title": "Chapter 2", "content": "<p>New <span class=\"highlight-box\">chapter</span> content...</p>" }
        ]
    }"#;
    let mut book = Book::from_json(json).unwrap();
    assert_eq!(book.chapters().len(), 2);
    assert_eq!(book.add_chapter(), 3);
    assert_eq!(book.chapter(2).unwrap().content.span_ranges().len(), 1);
}

#[test]
fn test_legacy_style_records_load() {
    let json = r#"{
        "title": "T",
        "chapters": [{ "id": 1, "title": "c", "content": "" }],
        "styles": { "quote": { "name": "Quote", "css": "color: red;" } }
    }"#;
    let book = Book::from_json(json).unwrap();
    let rule = book.styles().get("quote").unwrap();
    assert_eq!(rule.label, "Quote");
    assert_eq!(rule.declarations, "color: red;");
}

#[test]
fn test_broken_json_is_a_serialization_error() {
    assert!(matches!(
        Book::from_json("{ not json"),
        Err(BookError::Serialization(_))
    ));
    assert!(matches!(
        Book::from_json(r#"{"title": "T"}"#),
        Err(BookError::Serialization(_))
    ));
}

#[test]
fn test_structural_problems_are_invalid_book() {
    let json = r#"{"title": "T", "chapters": []}"#;
    assert!(matches!(Book::from_json(json), Err(BookError::InvalidBook(_))));
}

#[test]
fn test_chapter_ids_past_the_limit_are_invalid_book() {
    let json = r#"{"title": "T", "chapters": [{ "id": 18446744073709551615, "title": "c", "content": "" }]}"#;
    assert!(matches!(Book::from_json(json), Err(BookError::InvalidBook(_))));

    let json = format!(
        r#"{{"title": "T", "chapters": [{{ "id": {}, "title": "c", "content": "" }}]}}"#,
        MAX_CHAPTER_ID + 1
    );
    assert!(matches!(Book::from_json(&json), Err(BookError::InvalidBook(_))));

    let json = r#"{"title": "T", "chapters": [{ "id": 1, "title": "c", "content": "" }], "nextChapterId": 18446744073709551615}"#;
    assert!(matches!(Book::from_json(json), Err(BookError::InvalidBook(_))));
}

#[test]
fn test_largest_chapter_id_still_loads_and_grows() {
    let json = format!(
        r#"{{"title": "T", "chapters": [{{ "id": {MAX_CHAPTER_ID}, "title": "c", "content": "" }}]}}"#
    );
    let mut book = Book::from_json(&json).unwrap();
    assert_eq!(book.next_chapter_id(), MAX_CHAPTER_ID + 1);
    assert_eq!(book.add_chapter(), MAX_CHAPTER_ID + 1);
}
