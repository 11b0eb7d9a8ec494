//! Book export
//!
//! Exports turn a [`Book`] into one complete, self-contained document string:
//! styles are inlined in a `<style>` element and nothing is referenced from outside.
//! Each target is a [`Profile`] with its own [`Renderer`]:
//!
//! - `screen-html`: a reading copy with a fixed typographic stylesheet.
//! - `print-pdf`: a print document for a host print engine (browser print dialog,
//!   headless Chrome). Its stylesheet is a fixed print base followed by the
//!   book's effective style rules.
//!
//! Rendering is a pure function of the book, the profile and the [`RenderOptions`]:
//! the same inputs always give byte-identical output.
//!
//! Titles are interpolated verbatim unless [`RenderOptions::escape_titles`] is set.
//! Chapter content is always the chapter's serialized markup.

mod print;
mod screen;

pub use print::PrintRenderer;
pub use screen::ScreenRenderer;

use crate::book::Book;
use crate::fragment::escape_text;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

/// An export target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Profile {
    ScreenHtml,
    PrintPdf,
}

impl Profile {
    pub const ALL: [Profile; 2] = [Profile::ScreenHtml, Profile::PrintPdf];

    pub fn name(self) -> &'static str {
        self.renderer().name()
    }

    pub fn renderer(self) -> &'static dyn Renderer {
        match self {
            Profile::ScreenHtml => &ScreenRenderer,
            Profile::PrintPdf => &PrintRenderer,
        }
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Profile {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Profile::ALL
            .into_iter()
            .find(|profile| profile.name() == s)
            .ok_or_else(|| {
                format!("Unknown export profile '{s}' (expected screen-html or print-pdf)")
            })
    }
}

/// Paper size written into the print profile's `@page` rule
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageSize {
    #[default]
    A4,
    Letter,
    A5,
}

impl PageSize {
    pub fn css_value(self) -> &'static str {
        match self {
            PageSize::A4 => "A4",
            PageSize::Letter => "letter",
            PageSize::A5 => "A5",
        }
    }
}

impl FromStr for PageSize {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "a4" => Ok(PageSize::A4),
            "letter" => Ok(PageSize::Letter),
            "a5" => Ok(PageSize::A5),
            other => Err(format!(
                "Unknown page size '{other}' (expected a4, letter or a5)"
            )),
        }
    }
}

/// Knobs that are not part of the book itself
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    pub page_size: PageSize,
    /// CSS length used for the `@page` margin
    pub margin: String,
    /// Escape the book and chapter titles instead of interpolating them as markup
    pub escape_titles: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        RenderOptions {
            page_size: PageSize::A4,
            margin: "0.5in".to_string(),
            escape_titles: false,
        }
    }
}

impl RenderOptions {
    pub(crate) fn title<'a>(&self, title: &'a str) -> Cow<'a, str> {
        if self.escape_titles {
            Cow::Owned(escape_text(title))
        } else {
            Cow::Borrowed(title)
        }
    }
}

/// One export target's document builder
pub trait Renderer: Send + Sync {
    /// Profile name as used on the command line (e.g. "screen-html")
    fn name(&self) -> &'static str;

    /// One-line summary shown by `folio profiles`
    fn description(&self) -> &'static str;

    fn render(&self, book: &Book, options: &RenderOptions) -> String;
}

/// Render `book` for `profile` with default options
pub fn render(book: &Book, profile: Profile) -> String {
    render_with_options(book, profile, &RenderOptions::default())
}

pub fn render_with_options(book: &Book, profile: Profile, options: &RenderOptions) -> String {
    log::debug!(
        "rendering '{}' ({} chapters) as {profile}",
        book.title(),
        book.chapters().len()
    );
    profile.renderer().render(book, options)
}
