//! `screen-html`: a reading copy of the whole book

use super::{RenderOptions, Renderer};
use crate::book::Book;

const SCREEN_CSS: &str = "\
        body { font-family: 'Georgia', serif; max-width: 800px; margin: 0 auto; padding: 20px; line-height: 1.6; }
        h1 { text-align: center; border-bottom: 2px solid #333; padding-bottom: 10px; }
        .chapter { margin: 40px 0; }
        .chapter h2 { color: #333; border-left: 4px solid #007acc; padding-left: 10px; }";

#[derive(Debug, Default, Clone, Copy)]
pub struct ScreenRenderer;

impl Renderer for ScreenRenderer {
    fn name(&self) -> &'static str {
        "screen-html"
    }

    fn description(&self) -> &'static str {
        "Standalone HTML page for reading on screen"
    }

    fn render(&self, book: &Book, options: &RenderOptions) -> String {
        let title = options.title(book.title());

        let chapters: String = book
            .chapters()
            .iter()
            .map(|chapter| {
                format!(
                    "    <div class=\"chapter\">\n        <h2>{}</h2>\n        {}\n    </div>\n",
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
{SCREEN_CSS}
    </style>
</head>
<body>
    <h1>{title}</h1>
{chapters}</body>
</html>
"#
        )
    }
}
