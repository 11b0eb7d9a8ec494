//! Error types for book operations

use std::fmt;

/// Errors that can occur while editing or loading a book
///
/// Every variant is a local, recoverable condition. Operations that return one of
/// these leave the value they were called on untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookError {
    /// A toggle was requested on a zero-length selection
    EmptySelection,
    /// The selection does not fit inside the fragment's text
    RangeOutOfBounds {
        start: usize,
        length: usize,
        extent: usize,
    },
    /// No chapter with this id exists in the book
    ChapterNotFound(u64),
    /// A style key does not match `[a-z][a-z0-9-]*` (or names no known style)
    StyleKeyInvalid(String),
    /// The selection cannot be resolved against the fragment's structure
    MalformedMarkup(String),
    /// A loaded book violates a structural invariant
    InvalidBook(String),
    /// JSON encoding or decoding failed
    Serialization(String),
}

impl fmt::Display for BookError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BookError::EmptySelection => write!(f, "Select some text first to apply a style"),
            BookError::RangeOutOfBounds {
                start,
                length,
                extent,
            } => write!(
                f,
                "Selection {start}+{length} is outside the fragment text (length {extent})"
            ),
            BookError::ChapterNotFound(id) => write!(f, "Chapter {id} not found"),
            BookError::StyleKeyInvalid(key) => write!(f, "Invalid style key '{key}'"),
            BookError::MalformedMarkup(msg) => write!(f, "Malformed markup: {msg}"),
            BookError::InvalidBook(msg) => write!(f, "Invalid book: {msg}"),
            BookError::Serialization(msg) => write!(f, "Serialization error: {msg}"),
        }
    }
}

impl std::error::Error for BookError {}

impl From<serde_json::Error> for BookError {
    fn from(err: serde_json::Error) -> Self {
        BookError::Serialization(err.to_string())
    }
}
