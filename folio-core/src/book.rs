//! The book aggregate: title, ordered chapters and the style registry
//!
//! A [`Book`] always holds at least one chapter, and chapter ids are never reused:
//! the next id comes from a counter that only moves forward, so deleting the newest
//! chapter and adding another never brings an old id back.
//!
//! The JSON image uses camelCase field names:
//!
//! ```json
//! {
//!   "title": "Untitled Book",
//!   "chapters": [{ "id": 1, "title": "Chapter 1", "content": "<p>...</p>" }],
//!   "styles": { "quote": { "label": "Quote Block", "declarations": "..." } },
//!   "nextChapterId": 2
//! }
//! ```
//!
//! `styles` and `nextChapterId` are optional on load, which keeps books saved by the
//! first version of the editor readable.

use crate::error::BookError;
use crate::fragment::RichFragment;
use crate::registry::StyleRegistry;
use crate::style::SemanticClass;
use crate::toggle::{toggle, Selection};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::collections::HashSet;

pub type ChapterId = u64;

/// Largest chapter id a book may hold: 2^53 - 1, the last integer a JSON reader
/// backed by doubles still represents exactly.
pub const MAX_CHAPTER_ID: ChapterId = (1 << 53) - 1;

pub const DEFAULT_BOOK_TITLE: &str = "Untitled Book";

/// Content of the chapter a new book starts with
pub const FIRST_CHAPTER_PLACEHOLDER: &str = "<p>Start writing your book here...</p>";

/// Content of every chapter added afterwards
pub const NEW_CHAPTER_PLACEHOLDER: &str = "<p>New chapter content...</p>";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chapter {
    pub id: ChapterId,
    pub title: String,
    pub content: RichFragment,
}

impl Chapter {
    pub fn new(id: ChapterId, title: impl Into<String>, content: RichFragment) -> Self {
        Chapter {
            id,
            title: title.into(),
            content,
        }
    }
}

/// A multi-chapter book
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "BookImage")]
pub struct Book {
    title: String,
    chapters: Vec<Chapter>,
    styles: StyleRegistry,
    next_chapter_id: ChapterId,
}

impl Book {
    /// A book with one placeholder chapter (id 1)
    pub fn new(title: impl Into<String>) -> Self {
        Book {
            title: title.into(),
            chapters: vec![Chapter::new(
                1,
                "Chapter 1",
                RichFragment::parse(FIRST_CHAPTER_PLACEHOLDER),
            )],
            styles: StyleRegistry::new(),
            next_chapter_id: 2,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    /// Chapters in book order. Never empty.
    pub fn chapters(&self) -> &[Chapter] {
        &self.chapters
    }

    pub fn chapter(&self, id: ChapterId) -> Option<&Chapter> {
        self.chapters.iter().find(|chapter| chapter.id == id)
    }

    pub fn first_chapter(&self) -> &Chapter {
        &self.chapters[0]
    }

    pub fn styles(&self) -> &StyleRegistry {
        &self.styles
    }

    /// Id the next added chapter will get
    pub fn next_chapter_id(&self) -> ChapterId {
        self.next_chapter_id
    }

    /// Append a placeholder chapter and return its id
    pub fn add_chapter(&mut self) -> ChapterId {
        let id = self.next_chapter_id;
        self.next_chapter_id += 1;

        let title = format!("Chapter {}", self.chapters.len() + 1);
        log::debug!("adding chapter {id} ({title})");
        self.chapters.push(Chapter::new(
            id,
            title,
            RichFragment::parse(NEW_CHAPTER_PLACEHOLDER),
        ));
        id
    }

    /// Remove a chapter
    ///
    /// Returns `Ok(false)` without touching the book when `id` is the only chapter.
    pub fn delete_chapter(&mut self, id: ChapterId) -> Result<bool, BookError> {
        let index = self.index_of(id)?;
        if self.chapters.len() == 1 {
            log::debug!("refusing to delete chapter {id}: it is the only chapter");
            return Ok(false);
        }

        self.chapters.remove(index);
        log::debug!("deleted chapter {id}");
        Ok(true)
    }

    pub fn rename_chapter(&mut self, id: ChapterId, title: impl Into<String>) -> Result<(), BookError> {
        self.chapter_mut(id)?.title = title.into();
        Ok(())
    }

    pub fn set_chapter_content(
        &mut self,
        id: ChapterId,
        content: RichFragment,
    ) -> Result<(), BookError> {
        self.chapter_mut(id)?.content = content;
        Ok(())
    }

    /// Toggle a style over a selection of one chapter's text
    ///
    /// The chapter keeps its old content when the toggle fails.
    pub fn toggle_style(
        &mut self,
        id: ChapterId,
        selection: Selection,
        style_key: &str,
    ) -> Result<(), BookError> {
        let chapter = self.chapter_mut(id)?;
        chapter.content = toggle(&chapter.content, selection, style_key)?;
        Ok(())
    }

    /// Append the toolbar sample block for a semantic class to a chapter
    pub fn insert_style_block(&mut self, id: ChapterId, style_key: &str) -> Result<(), BookError> {
        let class = SemanticClass::from_key(style_key)
            .ok_or_else(|| BookError::StyleKeyInvalid(style_key.to_string()))?;
        let chapter = self.chapter_mut(id)?;

        let mut nodes = std::mem::take(&mut chapter.content.nodes);
        nodes.extend(RichFragment::parse(&class.insertion_markup()).nodes);
        chapter.content = RichFragment::new(nodes);
        Ok(())
    }

    pub fn set_style(&mut self, key: &str, declarations: &str) -> Result<(), BookError> {
        self.styles.set(key, declarations)
    }

    /// Drop the override for `key`; returns whether there was one
    pub fn reset_style(&mut self, key: &str) -> Result<bool, BookError> {
        self.styles.reset(key)
    }

    /// Whitespace-separated words across all chapters
    pub fn word_count(&self) -> usize {
        self.chapters
            .iter()
            .map(|chapter| chapter.content.plain_text().split_whitespace().count())
            .sum()
    }

    /// Parse and validate a JSON image
    pub fn from_json(json: &str) -> Result<Self, BookError> {
        let image: BookImage = serde_json::from_str(json)?;
        Book::try_from(image)
    }

    pub fn to_json(&self) -> Result<String, BookError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    fn index_of(&self, id: ChapterId) -> Result<usize, BookError> {
        self.chapters
            .iter()
            .position(|chapter| chapter.id == id)
            .ok_or(BookError::ChapterNotFound(id))
    }

    fn chapter_mut(&mut self, id: ChapterId) -> Result<&mut Chapter, BookError> {
        let index = self.index_of(id)?;
        Ok(&mut self.chapters[index])
    }
}

impl Default for Book {
    fn default() -> Self {
        Book::new(DEFAULT_BOOK_TITLE)
    }
}

/// Book JSON as found on disk, before its invariants are checked
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct BookImage {
    #[serde(default = "default_title")]
    title: String,
    chapters: Vec<Chapter>,
    #[serde(default)]
    styles: StyleRegistry,
    #[serde(default)]
    next_chapter_id: Option<ChapterId>,
}

fn default_title() -> String {
    DEFAULT_BOOK_TITLE.to_string()
}

impl TryFrom<BookImage> for Book {
    type Error = BookError;

    fn try_from(image: BookImage) -> Result<Self, Self::Error> {
        let mut seen = HashSet::new();
        for chapter in &image.chapters {
            if !seen.insert(chapter.id) {
                return Err(BookError::InvalidBook(format!(
                    "duplicate chapter id {}",
                    chapter.id
                )));
            }
        }

        let max_id = image
            .chapters
            .iter()
            .map(|chapter| chapter.id)
            .max()
            .ok_or_else(|| BookError::InvalidBook("a book needs at least one chapter".into()))?;
        if max_id > MAX_CHAPTER_ID {
            return Err(BookError::InvalidBook(format!(
                "chapter id {max_id} is larger than {MAX_CHAPTER_ID}"
            )));
        }

        // A stale counter must never hand out an id that is still in use.
        let next_chapter_id = match image.next_chapter_id {
            Some(next) if next > MAX_CHAPTER_ID + 1 => {
                return Err(BookError::InvalidBook(format!(
                    "nextChapterId {next} is larger than {}",
                    MAX_CHAPTER_ID + 1
                )));
            }
            Some(next) => next.max(max_id + 1),
            None => max_id + 1,
        };

        Ok(Book {
            title: image.title,
            chapters: image.chapters,
            styles: image.styles,
            next_chapter_id,
        })
    }
}

/// Persistence collaborator: where a book is loaded from and saved to
pub trait BookStore {
    type Error: std::error::Error;

    /// `Ok(None)` when nothing has been saved yet
    fn load_book(&self) -> Result<Option<Book>, Self::Error>;

    fn save_book(&self, book: &Book) -> Result<(), Self::Error>;
}

/// Keeps the JSON image of one book in memory
#[derive(Debug, Default)]
pub struct MemoryStore {
    image: RefCell<Option<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore::default()
    }

    /// The last saved JSON image, if any
    pub fn image(&self) -> Option<String> {
        self.image.borrow().clone()
    }
}

impl BookStore for MemoryStore {
    type Error = BookError;

    fn load_book(&self) -> Result<Option<Book>, BookError> {
        self.image
            .borrow()
            .as_deref()
            .map(Book::from_json)
            .transpose()
    }

    fn save_book(&self, book: &Book) -> Result<(), BookError> {
        let json = book.to_json()?;
        *self.image.borrow_mut() = Some(json);
        Ok(())
    }
}
