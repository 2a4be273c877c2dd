//! Personal wordbook module
//!
//! A small per-user store for saved words. The lookup core never touches
//! this; only the application layer reads and writes it.

mod store;

pub use store::{WordbookEntry, WordbookError, WordbookStore};
