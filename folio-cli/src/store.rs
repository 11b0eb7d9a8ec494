//! Book persistence as one pretty-printed JSON file
//!
//! Saves go through a temporary file in the target directory that is then renamed
//! over the book, so an interrupted save never leaves half a book behind.

use folio_core::{Book, BookError, BookStore};
use std::fmt;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

#[derive(Debug)]
pub enum StoreError {
    Io { path: PathBuf, source: io::Error },
    Book { path: PathBuf, source: BookError },
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Io { path, source } => write!(f, "{}: {source}", path.display()),
            StoreError::Book { path, source } => write!(f, "{}: {source}", path.display()),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Io { source, .. } => Some(source),
            StoreError::Book { source, .. } => Some(source),
        }
    }
}

#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonFileStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }

    fn book_error(&self, source: BookError) -> StoreError {
        StoreError::Book {
            path: self.path.clone(),
            source,
        }
    }
}

impl BookStore for JsonFileStore {
    type Error = StoreError;

    fn load_book(&self) -> Result<Option<Book>, StoreError> {
        let json = match fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(self.io_error(err)),
        };

        let book = Book::from_json(&json).map_err(|err| self.book_error(err))?;
        log::debug!(
            "loaded '{}' ({} chapters) from {}",
            book.title(),
            book.chapters().len(),
            self.path.display()
        );
        Ok(Some(book))
    }

    fn save_book(&self, book: &Book) -> Result<(), StoreError> {
        let json = book.to_json().map_err(|err| self.book_error(err))?;

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut file = NamedTempFile::new_in(dir).map_err(|err| self.io_error(err))?;
        file.write_all(json.as_bytes())
            .and_then(|_| file.write_all(b"\n"))
            .map_err(|err| self.io_error(err))?;
        file.persist(&self.path)
            .map_err(|err| self.io_error(err.error))?;

        log::debug!("saved '{}' to {}", book.title(), self.path.display());
        Ok(())
    }
}
