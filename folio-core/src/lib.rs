//! Semantic rich-text book model
//!
//! This crate holds everything about a book that is not I/O: the named styles, the
//! rich-text content of each chapter, the selection toggle that applies and removes
//! styles, the book aggregate and the export renderer. The folio-cli crate wraps it
//! with file persistence and a PDF print engine. Nothing in here touches the
//! filesystem, the environment or stdout.
//!
//! The file structure :
//!
//! ```text
//! .
//! ├── error.rs            # BookError
//! ├── style.rs            # StyleKey, SemanticClass, StyleRule
//! ├── registry.rs         # StyleRegistry: defaults + overrides
//! ├── fragment
//! │   ├── mod.rs          # RichFragment node model and the merge pass
//! │   ├── parser.rs       # markup → fragment (html5ever)
//! │   └── serializer.rs   # fragment → markup
//! ├── toggle.rs           # selection-scoped style toggle
//! ├── book.rs             # Book, Chapter, BookStore
//! ├── session.rs          # active chapter cursor
//! └── export
//!     ├── mod.rs          # Profile, Renderer, RenderOptions
//!     ├── screen.rs       # screen-html
//!     └── print.rs        # print-pdf
//! ```
//!
//! Content Model
//!
//! A chapter's content is stored as an HTML-like markup string, the same thing a
//! contentEditable surface produces. Parsing it yields a RichFragment: text runs,
//! styled spans (`<span class="KEY">`), and opaque markup the style system does not
//! own. Offsets used by selections count characters of visible text only.
//!
//! Every fragment handed out by this crate is normalized: no empty nodes, no two
//! adjacent text runs and no two adjacent spans with the same key. See
//! ./fragment/mod.rs for the details.
//!
//! Toggling
//!
//! The toggle is a pure function from (fragment, selection, key) to a new fragment,
//! see ./toggle.rs. Applying a style and then toggling the same selection again gives
//! back the original fragment, including when the selection cut through a span of
//! another style.
//!
//! Export
//!
//! Exports are deterministic strings: the same book, profile and options always give
//! the same document. Persisting or printing them is the caller's job.

pub mod book;
pub mod error;
pub mod export;
pub mod fragment;
pub mod registry;
pub mod session;
pub mod style;
pub mod toggle;

pub use book::{Book, BookStore, Chapter, ChapterId, MemoryStore};
pub use error::BookError;
pub use export::{render, render_with_options, PageSize, Profile, RenderOptions, Renderer};
pub use fragment::{Node, RichFragment, StyledSpan, TextRun};
pub use registry::StyleRegistry;
pub use session::Session;
pub use style::{SemanticClass, StyleKey, StyleRule};
pub use toggle::{toggle, toggle_markup, toggle_with_mode, Selection, ToggleMode};
