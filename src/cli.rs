//! Command-line interface parsing for Wordbook CLI
//!
//! This module handles parsing of CLI arguments using clap, including the
//! optional word argument for direct lookup, the --book flag for opening the
//! saved-words view, and the --purge-cache maintenance flag.

use clap::Parser;
use thiserror::Error;

/// Wordbook owner used when no --user is supplied
pub const DEFAULT_USER: &str = "default";

/// Error types for CLI argument parsing
#[derive(Debug, Error)]
pub enum CliError {
    /// A word argument and --book were given together
    #[error("--book cannot be combined with a word to look up")]
    BookWithWord,
}

/// Wordbook CLI - look up word definitions and keep a personal wordbook
#[derive(Parser, Debug)]
#[command(name = "wordbook")]
#[command(about = "Word definitions and a personal wordbook")]
#[command(version)]
pub struct Cli {
    /// Look up this word immediately and open the definition view
    ///
    /// Examples:
    ///   wordbook              # Open the search view
    ///   wordbook serendipity  # Look up "serendipity" right away
    ///   wordbook --book       # Open the saved-words view
    #[arg(value_name = "WORD")]
    pub word: Option<String>,

    /// Open directly in the wordbook (saved words) view
    #[arg(long)]
    pub book: bool,

    /// Wordbook owner identifier
    #[arg(long, value_name = "ID", default_value = DEFAULT_USER)]
    pub user: String,

    /// Delete expired cache records and exit without opening the TUI
    #[arg(long)]
    pub purge_cache: bool,
}

/// Configuration derived from CLI arguments for application startup
#[derive(Debug, Clone)]
pub struct StartupConfig {
    /// Word to look up as soon as the app starts
    pub initial_word: Option<String>,
    /// Whether to start in the wordbook view
    pub start_in_wordbook: bool,
    /// Wordbook owner
    pub user: String,
}

impl Default for StartupConfig {
    fn default() -> Self {
        Self {
            initial_word: None,
            start_in_wordbook: false,
            user: DEFAULT_USER.to_string(),
        }
    }
}

impl StartupConfig {
    /// Creates a StartupConfig from parsed CLI arguments.
    ///
    /// # Returns
    /// * `Ok(StartupConfig)` with appropriate settings
    /// * `Err(CliError)` if --book was combined with a word argument
    pub fn from_cli(cli: &Cli) -> Result<Self, CliError> {
        if cli.book && cli.word.is_some() {
            return Err(CliError::BookWithWord);
        }

        Ok(StartupConfig {
            initial_word: cli.word.clone(),
            start_in_wordbook: cli.book,
            user: cli.user.clone(),
        })
    }
}
