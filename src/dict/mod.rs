//! Dictionary lookup core for Wordbook CLI
//!
//! This module contains the normalized dictionary data model, the upstream
//! provider client, and the cache-aside lookup service that ties them
//! together.

pub mod provider;
pub mod service;

pub use provider::{ApiEntry, DictionaryProvider, FreeDictionaryClient, ProviderError};
pub use service::{DictionaryService, LookupError};

use serde::{Deserialize, Serialize};

/// A normalized dictionary lookup result
///
/// This is the canonical internal shape every lookup produces, regardless of
/// what the upstream provider returned. It is built once by the lookup
/// service and never mutated afterwards; the cache layer stores its
/// serialized form verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DictionaryEntry {
    /// The looked-up word, trimmed and lowercased
    pub word: String,
    /// Pronunciation entries in provider order
    pub phonetics: Vec<Phonetic>,
    /// Meanings grouped by part of speech, in provider order
    pub meanings: Vec<Meaning>,
    /// First source URL reported by the provider, if any
    #[serde(rename = "sourceUrl", skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
}

/// Pronunciation information for a word
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Phonetic {
    /// Phonetic transcription, e.g. "/həˈləʊ/"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// URL of an audio recording
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio: Option<String>,
    /// Where the pronunciation data came from
    #[serde(rename = "sourceUrl", skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
}

/// A group of definitions sharing a part of speech
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meaning {
    /// Part of speech, e.g. "noun" or "verb"
    #[serde(rename = "partOfSpeech")]
    pub part_of_speech: String,
    /// Definitions in provider order; may be empty
    pub definitions: Vec<Definition>,
    /// Synonyms at the meaning level
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub synonyms: Vec<String>,
    /// Antonyms at the meaning level
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub antonyms: Vec<String>,
}

/// A single definition of a word
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Definition {
    /// The definition text
    pub definition: String,
    /// Example usage, if the provider supplied one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,
    /// Synonyms for this specific sense
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub synonyms: Vec<String>,
    /// Antonyms for this specific sense
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub antonyms: Vec<String>,
}

impl DictionaryEntry {
    /// Returns the first definition text, if any meaning carries one
    ///
    /// Used as the short definition when saving a word to the wordbook.
    pub fn first_definition(&self) -> Option<&str> {
        self.meanings
            .iter()
            .flat_map(|m| m.definitions.iter())
            .map(|d| d.definition.as_str())
            .next()
    }
}
