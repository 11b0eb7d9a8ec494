//! screen-html export

use folio_core::{render, render_with_options, Book, Profile, RenderOptions, RichFragment};

fn sample_book() -> Book {
    let mut book = Book::new("My Book");
    book.rename_chapter(1, "Ch1").unwrap();
    book
}

#[test]
fn test_single_title_and_chapter_block() {
    let html = render(&sample_book(), Profile::ScreenHtml);

    assert_eq!(html.matches("<h1>").count(), 1);
    assert!(html.contains("<h1>My Book</h1>"));
    assert_eq!(html.matches("class=\"chapter\"").count(), 1);

    let block = &html[html.find("<div class=\"chapter\">").unwrap()..];
    assert!(block.contains("<h2>Ch1</h2>"));
}

#[test]
fn test_document_is_self_contained() {
    let html = render(&sample_book(), Profile::ScreenHtml);
    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("<style>"));
    assert!(!html.contains("<link"));
    assert!(!html.contains("<script"));
}

#[test]
fn test_chapters_in_book_order() {
    let mut book = sample_book();
    let second = book.add_chapter();
    let third = book.add_chapter();
    book.rename_chapter(second, "Middle").unwrap();
    book.rename_chapter(third, "End").unwrap();

    let html = render(&book, Profile::ScreenHtml);
    let positions: Vec<usize> = ["<h2>Ch1</h2>", "<h2>Middle</h2>", "<h2>End</h2>"]
        .iter()
        .map(|needle| html.find(needle).unwrap())
        .collect();
    assert!(positions.windows(2).all(|pair| pair[0] < pair[1]));
}

#[test]
fn test_styled_content_is_embedded() {
    let mut book = sample_book();
    book.set_chapter_content(
        1,
        RichFragment::parse("<p>See <span class=\"highlight-box\">this</span>.</p>"),
    )
    .unwrap();
    let html = render(&book, Profile::ScreenHtml);
    assert!(html.contains("<p>See <span class=\"highlight-box\">this</span>.</p>"));
}

#[test]
fn test_title_markup_is_kept_unless_escaping() {
    let mut book = sample_book();
    book.set_title("Tom & <b>Jerry</b>");

    let verbatim = render(&book, Profile::ScreenHtml);
    assert!(verbatim.contains("<h1>Tom & <b>Jerry</b></h1>"));

    let options = RenderOptions {
        escape_titles: true,
        ..RenderOptions::default()
    };
    let escaped = render_with_options(&book, Profile::ScreenHtml, &options);
    assert!(escaped.contains("<title>Tom &amp; &lt;b&gt;Jerry&lt;/b&gt;</title>"));
}
