//! UI rendering module for Wordbook CLI
//!
//! This module contains all the rendering logic for the terminal user
//! interface, using the ratatui library for TUI components.

pub mod definition;
pub mod help_overlay;
pub mod search;
pub mod wordbook_list;

pub use definition::render as render_definition;
pub use help_overlay::render as render_help_overlay;
pub use search::render as render_search;
pub use wordbook_list::render as render_wordbook_list;
