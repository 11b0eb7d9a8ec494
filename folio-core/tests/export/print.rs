//! print-pdf export

use folio_core::{render, render_with_options, Book, PageSize, Profile, RenderOptions};

#[test]
fn test_print_document_has_page_rule_and_registry_css() {
    let html = render(&Book::new("Printed"), Profile::PrintPdf);

    assert!(html.contains("@page {\n  size: A4;\n  margin: 0.5in;\n}"));
    for key in [
        "chapter-title",
        "section-title",
        "paragraph",
        "highlight-box",
        "code-block",
        "quote",
    ] {
        assert!(html.contains(&format!(".{key} {{\n")), "missing rule for {key}");
    }
    assert!(html.contains("<title>Printed</title>"));
}

#[test]
fn test_overrides_reach_print_css() {
    let mut book = Book::default();
    book.set_style("highlight-box", "background: yellow;").unwrap();
    book.set_style("sidebar", "float: right;").unwrap();

    let html = render(&book, Profile::PrintPdf);
    assert!(html.contains(".highlight-box {\n  background: yellow;\n}"));
    assert!(html.contains(".sidebar {\n  float: right;\n}"));
    assert!(html.find(".quote {\n  font-style").unwrap() < html.find(".sidebar {").unwrap());
}

#[test]
fn test_reset_style_restores_default_in_print() {
    let mut book = Book::default();
    book.set_style("quote", "color: red;").unwrap();
    book.reset_style("quote").unwrap();
    assert_eq!(
        render(&book, Profile::PrintPdf),
        render(&Book::default(), Profile::PrintPdf)
    );
}

#[test]
fn test_every_chapter_is_a_section() {
    let mut book = Book::default();
    book.add_chapter();
    book.add_chapter();
    let html = render(&book, Profile::PrintPdf);
    assert_eq!(html.matches("<section class=\"chapter\">").count(), 3);
    assert!(html.contains(".chapter + .chapter {\n  page-break-before: always;\n}"));
}

#[test]
fn test_page_size_option() {
    let options = RenderOptions {
        page_size: PageSize::A5,
        margin: "10mm".to_string(),
        ..RenderOptions::default()
    };
    let html = render_with_options(&Book::default(), Profile::PrintPdf, &options);
    assert!(html.contains("size: A5;\n  margin: 10mm;"));
}

#[test]
fn test_output_is_deterministic() {
    let mut book = Book::new("Same");
    book.set_style("b-note", "color: blue;").unwrap();
    book.set_style("a-note", "color: green;").unwrap();
    let first = render(&book, Profile::PrintPdf);
    let second = render(&book.clone(), Profile::PrintPdf);
    assert_eq!(first, second);
    assert!(first.find(".a-note {").unwrap() < first.find(".b-note {").unwrap());
}
