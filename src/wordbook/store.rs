//! Personal wordbook persistence
//!
//! Stores each user's saved words as a single JSON document in an
//! XDG-compliant data directory. Adding an existing word replaces its
//! definition rather than duplicating it, so (user, word) stays unique.

use std::fs;
use std::io;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised by the wordbook store
#[derive(Debug, Error)]
pub enum WordbookError {
    /// Filesystem operation failed
    #[error("wordbook storage failed: {0}")]
    Io(#[from] io::Error),

    /// A wordbook file exists but cannot be parsed
    #[error("corrupt wordbook for user '{user}': {source}")]
    Corrupt {
        user: String,
        #[source]
        source: serde_json::Error,
    },
}

/// A word saved in a user's wordbook
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordbookEntry {
    /// The saved word, normalized
    pub word: String,
    /// A one-line definition captured at save time
    pub short_definition: String,
    /// When the word was first saved
    pub added_at: DateTime<Utc>,
}

/// File-backed wordbook store, one JSON document per user
#[derive(Debug, Clone)]
pub struct WordbookStore {
    /// Directory where per-user wordbook files live
    data_dir: PathBuf,
}

/// Maps a user id to a filesystem-safe file stem
fn sanitize_user(user: &str) -> String {
    user.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

impl WordbookStore {
    /// Creates a store rooted at the XDG data directory
    ///
    /// Returns `None` if the data directory cannot be determined.
    pub fn open_default() -> Option<Self> {
        let project_dirs = ProjectDirs::from("", "", "wordbook")?;
        Some(Self {
            data_dir: project_dirs.data_dir().to_path_buf(),
        })
    }

    /// Creates a store rooted at a specific directory
    pub fn with_dir(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    /// Returns the wordbook file path for a user
    fn book_path(&self, user: &str) -> PathBuf {
        self.data_dir
            .join(format!("wordbook_{}.json", sanitize_user(user)))
    }

    /// Loads a user's entries, empty if the user has no wordbook yet
    fn load(&self, user: &str) -> Result<Vec<WordbookEntry>, WordbookError> {
        let content = match fs::read_to_string(self.book_path(user)) {
            Ok(content) => content,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(err.into()),
        };

        serde_json::from_str(&content).map_err(|source| WordbookError::Corrupt {
            user: user.to_string(),
            source,
        })
    }

    /// Rewrites a user's wordbook atomically
    fn save(&self, user: &str, entries: &[WordbookEntry]) -> Result<(), WordbookError> {
        fs::create_dir_all(&self.data_dir)?;

        let json = serde_json::to_string_pretty(entries)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

        let path = self.book_path(user);
        let tmp_path = path.with_extension("json.tmp");
        fs::write(&tmp_path, json)?;
        fs::rename(&tmp_path, &path)?;

        Ok(())
    }

    /// Saves a word, replacing the definition if the word is already present
    ///
    /// An existing entry keeps its original `added_at`.
    pub fn add(
        &self,
        user: &str,
        word: &str,
        short_definition: &str,
    ) -> Result<WordbookEntry, WordbookError> {
        let mut entries = self.load(user)?;

        let entry = if let Some(existing) = entries.iter_mut().find(|e| e.word == word) {
            existing.short_definition = short_definition.to_string();
            existing.clone()
        } else {
            let entry = WordbookEntry {
                word: word.to_string(),
                short_definition: short_definition.to_string(),
                added_at: Utc::now(),
            };
            entries.push(entry.clone());
            entry
        };

        self.save(user, &entries)?;
        Ok(entry)
    }

    /// Removes a word; returns whether it was present
    pub fn remove(&self, user: &str, word: &str) -> Result<bool, WordbookError> {
        let mut entries = self.load(user)?;
        let before = entries.len();
        entries.retain(|e| e.word != word);

        if entries.len() == before {
            return Ok(false);
        }

        self.save(user, &entries)?;
        Ok(true)
    }

    /// Returns a user's entries, most recently added first
    pub fn entries(&self, user: &str) -> Result<Vec<WordbookEntry>, WordbookError> {
        let mut entries = self.load(user)?;
        entries.sort_by(|a, b| b.added_at.cmp(&a.added_at));
        Ok(entries)
    }

    /// Whether a word is saved in the user's wordbook
    pub fn contains(&self, user: &str, word: &str) -> Result<bool, WordbookError> {
        Ok(self.load(user)?.iter().any(|e| e.word == word))
    }
}
