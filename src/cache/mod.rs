//! Cache module for dictionary lookup results
//!
//! This module provides a durable key-value store for normalized dictionary
//! entries, keyed by word, with absolute expiry timestamps. Reads treat
//! expired and missing records identically; writes are atomic upserts so the
//! store never holds more than one live record per word.

mod store;

pub use store::{CacheRecord, CacheStore, CacheStoreError};
