//! Fragment tests: markup parsing, serialization and the toggle engine

mod properties;
mod toggle;
