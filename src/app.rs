//! Application state management for Wordbook CLI
//!
//! This module contains the main application state, handling keyboard input,
//! lookup dispatch, and state transitions between the search, definition,
//! and wordbook views.

use crossterm::event::{KeyCode, KeyEvent};

use crate::cache::CacheStore;
use crate::cli::{StartupConfig, DEFAULT_USER};
use crate::dict::{DictionaryEntry, DictionaryService, FreeDictionaryClient, LookupError};
use crate::wordbook::{WordbookEntry, WordbookStore};

/// Application state enum representing the current view
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppState {
    /// Text input view for entering a word to look up
    Search,
    /// Transient state while a lookup is in flight
    Loading,
    /// Definition view showing a lookup result or a lookup failure
    Definition,
    /// Saved words list view
    Wordbook,
}

/// Main application struct managing state and data
pub struct App {
    /// Current application state/view
    pub state: AppState,
    /// Text typed into the search view
    pub search_input: String,
    /// Word waiting to be looked up by the async main loop
    pub pending_lookup: Option<String>,
    /// Result of the most recent lookup, if it succeeded
    pub current_entry: Option<DictionaryEntry>,
    /// Human-readable description of the most recent lookup failure
    pub lookup_error: Option<String>,
    /// Whether the current entry's word is saved in the wordbook
    pub in_wordbook: bool,
    /// Saved words, newest first, loaded when entering the wordbook view
    pub wordbook_entries: Vec<WordbookEntry>,
    /// Index of the currently selected wordbook entry
    pub selected_index: usize,
    /// One-line feedback after an action ("Saved to wordbook")
    pub status_message: Option<String>,
    /// Scroll offset for the definition view
    pub detail_scroll_offset: u16,
    /// Flag to show help overlay
    pub show_help: bool,
    /// Flag indicating the application should quit
    pub should_quit: bool,
    /// Wordbook owner
    pub user: String,
    /// Lookup service over the real provider
    service: DictionaryService<FreeDictionaryClient>,
    /// Personal wordbook store
    wordbook: WordbookStore,
}

impl App {
    /// Creates a new App instance with default state
    pub fn new() -> Self {
        let cache = CacheStore::open_default()
            .unwrap_or_else(|| CacheStore::with_dir(std::env::temp_dir().join("wordbook-cache")));
        let wordbook = WordbookStore::open_default()
            .unwrap_or_else(|| WordbookStore::with_dir(std::env::temp_dir().join("wordbook-data")));
        let service = DictionaryService::new(FreeDictionaryClient::new(), cache);

        Self::assemble(service, wordbook, DEFAULT_USER.to_string())
    }

    /// Creates a new App instance with the given startup configuration.
    ///
    /// This is used to apply CLI arguments like a direct word lookup or
    /// --book to set the initial state.
    pub fn with_startup_config(config: StartupConfig) -> Self {
        let mut app = Self::new();
        app.user = config.user;

        if let Some(word) = config.initial_word {
            app.pending_lookup = Some(word);
            app.state = AppState::Loading;
        } else if config.start_in_wordbook {
            app.enter_wordbook();
        }

        app
    }

    /// Creates a new App instance over specific stores (for testing)
    #[cfg(test)]
    pub fn with_stores(cache: CacheStore, wordbook: WordbookStore, user: &str) -> Self {
        let service = DictionaryService::new(FreeDictionaryClient::new(), cache);
        Self::assemble(service, wordbook, user.to_string())
    }

    fn assemble(
        service: DictionaryService<FreeDictionaryClient>,
        wordbook: WordbookStore,
        user: String,
    ) -> Self {
        Self {
            state: AppState::Search,
            search_input: String::new(),
            pending_lookup: None,
            current_entry: None,
            lookup_error: None,
            in_wordbook: false,
            wordbook_entries: Vec::new(),
            selected_index: 0,
            status_message: None,
            detail_scroll_offset: 0,
            show_help: false,
            should_quit: false,
            user,
            service,
            wordbook,
        }
    }

    /// Whether a lookup is waiting to be performed
    pub fn has_pending_lookup(&self) -> bool {
        self.pending_lookup.is_some()
    }

    /// Performs the pending lookup, if any, and moves to the definition view
    ///
    /// Called by the main loop between input polls; `handle_key` only ever
    /// requests lookups by setting the pending word.
    pub async fn perform_pending_lookup(&mut self) {
        let Some(word) = self.pending_lookup.take() else {
            return;
        };

        match self.service.lookup(&word).await {
            Ok(entry) => {
                self.in_wordbook = self
                    .wordbook
                    .contains(&self.user, &entry.word)
                    .unwrap_or(false);
                self.current_entry = Some(entry);
                self.lookup_error = None;
            }
            Err(err) => {
                self.current_entry = None;
                self.in_wordbook = false;
                self.lookup_error = Some(describe_lookup_error(&err));
            }
        }

        self.detail_scroll_offset = 0;
        self.state = AppState::Definition;
    }

    /// Handles keyboard input and updates state accordingly
    ///
    /// # Key Bindings
    /// - Search: type to edit, `Enter` look up, `Tab` wordbook, `Esc` quit
    /// - Definition: `a` save word, `Tab` wordbook, `Esc` back, `q` quit
    /// - Wordbook: `Enter` look up selection, `d` delete, `Esc` back, `q` quit
    /// - `?` toggles the help overlay in any view
    pub fn handle_key(&mut self, key_event: KeyEvent) {
        // Any key clears transient feedback from the previous action
        self.status_message = None;

        // Help overlay intercepts all keys when shown
        if self.show_help {
            match key_event.code {
                KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q') => {
                    self.show_help = false;
                }
                _ => {}
            }
            return;
        }

        match self.state {
            AppState::Search => match key_event.code {
                KeyCode::Esc => {
                    self.should_quit = true;
                }
                KeyCode::Enter => {
                    self.submit_search();
                }
                KeyCode::Tab => {
                    self.enter_wordbook();
                }
                KeyCode::Backspace => {
                    self.search_input.pop();
                }
                KeyCode::Char('?') => {
                    self.show_help = true;
                }
                KeyCode::Char(c) => {
                    self.search_input.push(c);
                }
                _ => {}
            },
            AppState::Loading => {
                // Only quit is allowed while a lookup is in flight
                if key_event.code == KeyCode::Char('q') {
                    self.should_quit = true;
                }
            }
            AppState::Definition => match key_event.code {
                KeyCode::Char('q') => {
                    self.should_quit = true;
                }
                KeyCode::Esc => {
                    self.leave_definition();
                }
                KeyCode::Char('a') => {
                    self.save_current_word();
                }
                KeyCode::Tab | KeyCode::Char('b') => {
                    self.enter_wordbook();
                }
                KeyCode::Char('j') | KeyCode::Down => {
                    self.detail_scroll_offset = self.detail_scroll_offset.saturating_add(1);
                }
                KeyCode::Char('k') | KeyCode::Up => {
                    self.detail_scroll_offset = self.detail_scroll_offset.saturating_sub(1);
                }
                KeyCode::Char('g') => {
                    self.detail_scroll_offset = 0;
                }
                KeyCode::Char('?') => {
                    self.show_help = true;
                }
                _ => {}
            },
            AppState::Wordbook => match key_event.code {
                KeyCode::Char('q') => {
                    self.should_quit = true;
                }
                KeyCode::Esc => {
                    self.state = AppState::Search;
                }
                KeyCode::Up | KeyCode::Char('k') => {
                    self.move_selection_up();
                }
                KeyCode::Down | KeyCode::Char('j') => {
                    self.move_selection_down();
                }
                KeyCode::Enter => {
                    if let Some(entry) = self.wordbook_entries.get(self.selected_index) {
                        self.pending_lookup = Some(entry.word.clone());
                        self.state = AppState::Loading;
                    }
                }
                KeyCode::Char('d') => {
                    self.delete_selected_word();
                }
                KeyCode::Char('?') => {
                    self.show_help = true;
                }
                _ => {}
            },
        }
    }

    /// Requests a lookup of the current search input
    fn submit_search(&mut self) {
        let word = self.search_input.trim();
        if word.is_empty() {
            return;
        }
        self.pending_lookup = Some(word.to_string());
        self.state = AppState::Loading;
    }

    /// Leaves the definition view back to search, clearing the result
    fn leave_definition(&mut self) {
        self.current_entry = None;
        self.lookup_error = None;
        self.detail_scroll_offset = 0;
        self.state = AppState::Search;
    }

    /// Switches to the wordbook view, reloading the saved entries
    pub fn enter_wordbook(&mut self) {
        match self.wordbook.entries(&self.user) {
            Ok(entries) => {
                self.wordbook_entries = entries;
                self.selected_index = self
                    .selected_index
                    .min(self.wordbook_entries.len().saturating_sub(1));
            }
            Err(err) => {
                self.wordbook_entries = Vec::new();
                self.status_message = Some(format!("Could not read wordbook: {}", err));
            }
        }
        self.state = AppState::Wordbook;
    }

    /// Saves the currently shown entry to the wordbook
    fn save_current_word(&mut self) {
        let Some(entry) = &self.current_entry else {
            return;
        };
        let short_definition = entry.first_definition().unwrap_or_default().to_string();

        match self.wordbook.add(&self.user, &entry.word, &short_definition) {
            Ok(saved) => {
                self.in_wordbook = true;
                self.status_message = Some(format!("Saved \"{}\" to wordbook", saved.word));
            }
            Err(err) => {
                self.status_message = Some(format!("Could not save word: {}", err));
            }
        }
    }

    /// Deletes the selected wordbook entry
    fn delete_selected_word(&mut self) {
        let Some(entry) = self.wordbook_entries.get(self.selected_index) else {
            return;
        };
        let word = entry.word.clone();

        match self.wordbook.remove(&self.user, &word) {
            Ok(_) => {
                self.status_message = Some(format!("Removed \"{}\" from wordbook", word));
                self.reload_wordbook();
            }
            Err(err) => {
                self.status_message = Some(format!("Could not remove word: {}", err));
            }
        }
    }

    /// Reloads wordbook entries after a mutation, keeping the selection valid
    fn reload_wordbook(&mut self) {
        self.wordbook_entries = self.wordbook.entries(&self.user).unwrap_or_default();
        self.selected_index = self
            .selected_index
            .min(self.wordbook_entries.len().saturating_sub(1));
    }

    /// Moves the wordbook selection up
    fn move_selection_up(&mut self) {
        self.selected_index = self.selected_index.saturating_sub(1);
    }

    /// Moves the wordbook selection down
    fn move_selection_down(&mut self) {
        if self.selected_index + 1 < self.wordbook_entries.len() {
            self.selected_index += 1;
        }
    }
}

/// Renders a lookup failure as a user-facing message
///
/// "Word does not exist" and "provider unreachable" must read differently.
fn describe_lookup_error(err: &LookupError) -> String {
    match err {
        LookupError::NotFound(word) => format!("No definitions found for \"{}\"", word),
        LookupError::EmptyWord => "Type a word to look up".to_string(),
        LookupError::EmptyResponse | LookupError::Upstream(_) => {
            format!("The dictionary service could not be reached: {}", err)
        }
        LookupError::CorruptCache { word, .. } => {
            format!("Cached entry for \"{}\" is unreadable", word)
        }
        LookupError::Cache(err) => format!("Cache error: {}", err),
    }
}
