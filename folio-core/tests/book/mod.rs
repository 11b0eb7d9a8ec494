//! Book model tests: chapter lifecycle, persistence and sessions

mod lifecycle;
mod persistence;
mod session;
