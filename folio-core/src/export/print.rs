//! `print-pdf`: a paged document for a print engine
//!
//! The stylesheet has two parts. The print base sets up the page box and keeps
//! chapters, section titles and box-like classes from breaking badly across pages.
//! The book's effective style rules follow it, defaults first, so author overrides
//! reach the printed page.

use super::{RenderOptions, Renderer};
use crate::book::Book;
use crate::style::{SemanticClass, StyleRule};

#[derive(Debug, Default, Clone, Copy)]
pub struct PrintRenderer;

impl Renderer for PrintRenderer {
    fn name(&self) -> &'static str {
        "print-pdf"
    }

    fn description(&self) -> &'static str {
        "Print document with page rules, for PDF output via a print engine"
    }

    fn render(&self, book: &Book, options: &RenderOptions) -> String {
        let title = options.title(book.title());
        let base = print_base_css(options);
        let rules = book
            .styles()
            .effective_rules()
            .iter()
            .map(StyleRule::css_rule)
            .collect::<Vec<_>>()
            .join("\n\n");

        let chapters: String = book
            .chapters()
            .iter()
            .map(|chapter| {
                format!(
                    "    <section class=\"chapter\">\n        <h1 class=\"chapter-title\">{}</h1>\n        {}\n    </section>\n",
                    options.title(&chapter.title),
                    chapter.content.to_markup()
                )
            })
            .collect();

        format!(
            r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <style>
{base}

{rules}
    </style>
</head>
<body>
    <h1 class="book-title">{title}</h1>
{chapters}</body>
</html>
"#
        )
    }
}

fn print_base_css(options: &RenderOptions) -> String {
    let boxes = SemanticClass::ALL
        .into_iter()
        .filter(|class| class.is_box())
        .map(|class| format!(".{class}"))
        .collect::<Vec<_>>()
        .join(",\n");

    format!(
        "@page {{
  size: {size};
  margin: {margin};
}}

* {{
  margin: 0;
  padding: 0;
  box-sizing: border-box;
}}

body {{
  font-family: 'Georgia', 'Times New Roman', serif;
  line-height: 1.7;
  color: #2c3e50;
  background: white;
  -webkit-print-color-adjust: exact;
  print-color-adjust: exact;
}}

.book-title {{
  font-size: 3rem;
  text-align: center;
  margin: 4rem 0;
  page-break-after: always;
}}

.chapter {{
  page-break-inside: avoid;
}}

.chapter + .chapter {{
  page-break-before: always;
}}

.section-title {{
  page-break-after: avoid;
}}

{boxes} {{
  page-break-inside: avoid;
}}

.code-block {{
  white-space: pre-wrap;
}}",
        size = options.page_size.css_value(),
        margin = options.margin,
    )
}
