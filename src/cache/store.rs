//! Durable cache store for normalized dictionary entries
//!
//! Stores one JSON record per word in an XDG-compliant cache directory. Each
//! record carries an opaque serialized payload together with provenance and
//! an absolute expiry timestamp. Expired records are indistinguishable from
//! missing ones; only storage faults surface as errors.

use std::fs;
use std::io;
use std::path::PathBuf;

use chrono::{DateTime, Duration, Utc};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised by the cache store
///
/// A miss is never an error; these cover genuine storage faults only.
#[derive(Debug, Error)]
pub enum CacheStoreError {
    /// Filesystem operation failed
    #[error("cache storage failed: {0}")]
    Io(#[from] io::Error),

    /// A record file exists but cannot be parsed
    #[error("corrupt cache record for '{word}': {source}")]
    CorruptRecord {
        word: String,
        #[source]
        source: serde_json::Error,
    },
}

/// A persisted cache-aside record
///
/// Exactly one live record exists per word at any time; `upsert` replaces
/// all fields atomically.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheRecord {
    /// Normalized word this record belongs to
    pub word: String,
    /// Serialized entry, opaque to the store
    pub payload: String,
    /// Provenance tag of the provider that produced the payload
    pub source: String,
    /// When the payload was (re)fetched
    pub fetched_at: DateTime<Utc>,
    /// Absolute expiry; the record is invalid once "now" reaches this
    pub expires_at: DateTime<Utc>,
}

/// File-backed cache store keyed by normalized word
///
/// Records are stored as JSON files in an XDG-compliant cache directory
/// (`~/.cache/wordbook/` on Linux). Writes go to a temporary file first and
/// are renamed into place, so a concurrent reader never observes a
/// half-written record.
#[derive(Debug, Clone)]
pub struct CacheStore {
    /// Directory where record files are stored
    cache_dir: PathBuf,
}

/// Whether a record is still valid at the given instant
///
/// Validity requires the expiry to be strictly in the future; a record whose
/// `expires_at` equals "now" is already a miss.
fn is_valid_at(record: &CacheRecord, now: DateTime<Utc>) -> bool {
    now < record.expires_at
}

/// Maps a word to a filesystem-safe file stem
///
/// Collisions are possible ("naïve" and "na_ve" share a stem); the store
/// compensates by checking the stored record's `word` field on read.
fn sanitize_key(word: &str) -> String {
    word.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '\'' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

impl CacheStore {
    /// Creates a store rooted at the XDG cache directory
    ///
    /// Returns `None` if the cache directory cannot be determined (e.g., no
    /// home directory).
    pub fn open_default() -> Option<Self> {
        let project_dirs = ProjectDirs::from("", "", "wordbook")?;
        Some(Self {
            cache_dir: project_dirs.cache_dir().to_path_buf(),
        })
    }

    /// Creates a store rooted at a specific directory
    pub fn with_dir(cache_dir: PathBuf) -> Self {
        Self { cache_dir }
    }

    /// Returns the record file path for a word
    fn record_path(&self, word: &str) -> PathBuf {
        self.cache_dir.join(format!("{}.json", sanitize_key(word)))
    }

    /// Ensures the cache directory exists
    fn ensure_dir(&self) -> io::Result<()> {
        fs::create_dir_all(&self.cache_dir)
    }

    /// Returns the record for `word` if one exists and has not expired
    ///
    /// A missing or expired record yields `Ok(None)`. An unreadable or
    /// unparsable record file is a storage fault, not a miss.
    pub fn get_if_valid(&self, word: &str) -> Result<Option<CacheRecord>, CacheStoreError> {
        let path = self.record_path(word);
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };

        let record: CacheRecord =
            serde_json::from_str(&content).map_err(|source| CacheStoreError::CorruptRecord {
                word: word.to_string(),
                source,
            })?;

        // A sanitized-filename collision stores a different word here
        if record.word != word {
            return Ok(None);
        }

        if !is_valid_at(&record, Utc::now()) {
            return Ok(None);
        }

        Ok(Some(record))
    }

    /// Inserts or replaces the record for `word`
    ///
    /// Sets `fetched_at` to now and `expires_at` to now + `ttl`, replacing
    /// any prior record for the word in a single rename.
    pub fn upsert(
        &self,
        word: &str,
        payload: &str,
        source: &str,
        ttl: Duration,
    ) -> Result<(), CacheStoreError> {
        self.ensure_dir()?;

        let now = Utc::now();
        let record = CacheRecord {
            word: word.to_string(),
            payload: payload.to_string(),
            source: source.to_string(),
            fetched_at: now,
            expires_at: now + ttl,
        };

        let json = serde_json::to_string_pretty(&record)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

        let path = self.record_path(word);
        let tmp_path = path.with_extension("json.tmp");
        fs::write(&tmp_path, json)?;
        fs::rename(&tmp_path, &path)?;

        Ok(())
    }

    /// Deletes all records whose expiry has passed
    ///
    /// "Now" is snapshotted once at entry, so a record written while the
    /// sweep runs is never deleted. Unparsable files are left alone. Returns
    /// the number of records removed.
    pub fn purge_expired(&self) -> Result<usize, CacheStoreError> {
        let now = Utc::now();

        let dir = match fs::read_dir(&self.cache_dir) {
            Ok(dir) => dir,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(0),
            Err(err) => return Err(err.into()),
        };

        let mut removed = 0;
        for item in dir {
            let path = item?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let Ok(content) = fs::read_to_string(&path) else {
                continue;
            };
            let Ok(record) = serde_json::from_str::<CacheRecord>(&content) else {
                continue;
            };
            if record.expires_at < now {
                fs::remove_file(&path)?;
                removed += 1;
            }
        }

        Ok(removed)
    }
}
