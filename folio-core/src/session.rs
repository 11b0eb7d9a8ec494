//! Editing session: one book plus the chapter being edited
//!
//! The session is what an editing surface talks to. It keeps the active-chapter
//! cursor valid across chapter deletion: when the active chapter goes away, the first
//! remaining chapter becomes active.

use crate::book::{Book, Chapter, ChapterId};
use crate::error::BookError;
use crate::fragment::RichFragment;
use crate::toggle::Selection;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    book: Book,
    active: ChapterId,
}

impl Session {
    /// Start editing `book` at its first chapter
    pub fn new(book: Book) -> Self {
        let active = book.first_chapter().id;
        Session { book, active }
    }

    pub fn book(&self) -> &Book {
        &self.book
    }

    pub fn into_book(self) -> Book {
        self.book
    }

    pub fn active_id(&self) -> ChapterId {
        self.active
    }

    pub fn active_chapter(&self) -> &Chapter {
        self.book
            .chapter(self.active)
            .unwrap_or_else(|| self.book.first_chapter())
    }

    /// Serialized content of the active chapter, as handed back to the editing surface
    pub fn active_markup(&self) -> String {
        self.active_chapter().content.to_markup()
    }

    pub fn select(&mut self, id: ChapterId) -> Result<(), BookError> {
        if self.book.chapter(id).is_none() {
            return Err(BookError::ChapterNotFound(id));
        }
        self.active = id;
        Ok(())
    }

    /// Add a chapter and make it active
    pub fn add_chapter(&mut self) -> ChapterId {
        let id = self.book.add_chapter();
        self.active = id;
        id
    }

    pub fn delete_chapter(&mut self, id: ChapterId) -> Result<bool, BookError> {
        let removed = self.book.delete_chapter(id)?;
        if removed && self.active == id {
            self.active = self.book.first_chapter().id;
            log::debug!("active chapter moved to {}", self.active);
        }
        Ok(removed)
    }

    pub fn toggle_style(&mut self, selection: Selection, style_key: &str) -> Result<(), BookError> {
        self.book.toggle_style(self.active, selection, style_key)
    }

    pub fn insert_style_block(&mut self, style_key: &str) -> Result<(), BookError> {
        self.book.insert_style_block(self.active, style_key)
    }

    pub fn set_active_content(&mut self, markup: &str) -> Result<(), BookError> {
        self.book
            .set_chapter_content(self.active, RichFragment::parse(markup))
    }

    pub fn rename_active(&mut self, title: impl Into<String>) -> Result<(), BookError> {
        self.book.rename_chapter(self.active, title)
    }

    pub fn set_book_title(&mut self, title: impl Into<String>) {
        self.book.set_title(title);
    }

    pub fn set_style(&mut self, key: &str, declarations: &str) -> Result<(), BookError> {
        self.book.set_style(key, declarations)
    }

    pub fn reset_style(&mut self, key: &str) -> Result<bool, BookError> {
        self.book.reset_style(key)
    }
}

impl From<Book> for Session {
    fn from(book: Book) -> Self {
        Session::new(book)
    }
}
