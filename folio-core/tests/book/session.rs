//! Editing sessions driving a book the way the editor does

use folio_core::{Book, BookError, Selection, Session};

#[test]
fn test_editor_flow() {
    let mut session = Session::new(Book::default());
    session.set_book_title("My Book");
    session.rename_active("Intro").unwrap();
    session.set_active_content("<p>Hello world</p>").unwrap();
    session
        .toggle_style(Selection::new(0, 5), "highlight-box")
        .unwrap();
    assert_eq!(
        session.active_markup(),
        "<p><span class=\"highlight-box\">Hello</span> world</p>"
    );

    let second = session.add_chapter();
    assert_eq!(session.active_chapter().title, "Chapter 2");
    session.insert_style_block("quote").unwrap();

    session.delete_chapter(second).unwrap();
    assert_eq!(session.active_id(), 1);
    assert_eq!(session.active_chapter().title, "Intro");
}

#[test]
fn test_failed_toggle_leaves_content() {
    let mut session = Session::new(Book::default());
    let before = session.active_markup();
    assert_eq!(
        session.toggle_style(Selection::new(0, 0), "quote"),
        Err(BookError::EmptySelection)
    );
    assert_eq!(session.active_markup(), before);
}

#[test]
fn test_only_chapter_survives_delete() {
    let mut session = Session::new(Book::default());
    assert_eq!(session.delete_chapter(1), Ok(false));
    assert_eq!(session.active_id(), 1);
    assert_eq!(session.book().chapters().len(), 1);
}

#[test]
fn test_session_styles_reach_book() {
    let mut session = Session::from(Book::default());
    session.set_style("aside", "color: gray;").unwrap();
    assert!(session.book().styles().has("aside"));
    assert!(session.reset_style("aside").unwrap());
    assert!(!session.book().styles().has("aside"));
}
