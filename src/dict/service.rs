//! Cache-aside dictionary lookup service
//!
//! Orchestrates the lookup path: check the cache store for a still-valid
//! normalized entry, otherwise fetch raw entries from the upstream provider,
//! normalize the first one, and re-cache the result. Caching is best-effort;
//! a failed write never fails the lookup.

use chrono::Duration;
use thiserror::Error;
use tracing::warn;

use super::provider::{ApiEntry, DictionaryProvider, ProviderError};
use super::{Definition, DictionaryEntry, Meaning, Phonetic};
use crate::cache::{CacheStore, CacheStoreError};

/// Time-to-live for cached dictionary entries in days
const CACHE_TTL_DAYS: i64 = 7;

/// Errors that can occur during a lookup
#[derive(Debug, Error)]
pub enum LookupError {
    /// Input was empty after trimming
    #[error("word cannot be empty")]
    EmptyWord,

    /// A valid cache record holds a payload that no longer parses
    #[error("corrupt cache entry for '{word}': {source}")]
    CorruptCache {
        word: String,
        #[source]
        source: serde_json::Error,
    },

    /// The provider confirms the word does not exist
    #[error("word not found: {0}")]
    NotFound(String),

    /// The provider answered successfully but with no entries
    #[error("empty response from dictionary API")]
    EmptyResponse,

    /// The provider could not be reached or understood
    #[error("dictionary API lookup failed: {0}")]
    Upstream(#[source] ProviderError),

    /// The cache store failed on read
    #[error("cache lookup failed: {0}")]
    Cache(#[from] CacheStoreError),
}

/// Dictionary lookup service with a cache-aside store
///
/// Both collaborators are injected at construction; tests substitute a fake
/// provider and a temp-directory store.
pub struct DictionaryService<P> {
    provider: P,
    cache: CacheStore,
}

impl<P: DictionaryProvider> DictionaryService<P> {
    /// Creates a new service over the given provider and cache store
    pub fn new(provider: P, cache: CacheStore) -> Self {
        Self { provider, cache }
    }

    /// Looks up a word, serving from cache when possible
    ///
    /// The input is trimmed and lowercased before it touches the cache or
    /// the provider, so `" Hello "` and `"hello"` share one cache key.
    ///
    /// # Returns
    /// * `Ok(DictionaryEntry)` - the normalized entry, cached or fresh
    /// * `Err(LookupError)` - empty input, corrupt cache, word not found,
    ///   provider failure, or a cache read fault
    pub async fn lookup(&self, raw_word: &str) -> Result<DictionaryEntry, LookupError> {
        let word = raw_word.trim().to_lowercase();
        if word.is_empty() {
            return Err(LookupError::EmptyWord);
        }

        // Cache-aside read; a corrupt payload is an error, not a miss
        if let Some(record) = self.cache.get_if_valid(&word)? {
            let entry = serde_json::from_str(&record.payload).map_err(|source| {
                LookupError::CorruptCache {
                    word: word.clone(),
                    source,
                }
            })?;
            return Ok(entry);
        }

        let entries = match self.provider.fetch_entries(&word).await {
            Ok(entries) => entries,
            Err(ProviderError::NotFound) => return Err(LookupError::NotFound(word)),
            Err(err) => return Err(LookupError::Upstream(err)),
        };

        // A 200 with no entries is a provider contract violation, not a
        // lexical absence
        let Some(first) = entries.into_iter().next() else {
            return Err(LookupError::EmptyResponse);
        };

        let entry = normalize_entry(&word, first);

        // Best-effort write-back; the lookup succeeds regardless
        match serde_json::to_string(&entry) {
            Ok(payload) => {
                if let Err(err) = self.cache.upsert(
                    &word,
                    &payload,
                    self.provider.source_tag(),
                    Duration::days(CACHE_TTL_DAYS),
                ) {
                    warn!(word = %word, error = %err, "failed to cache dictionary entry");
                }
            }
            Err(err) => {
                warn!(word = %word, error = %err, "failed to serialize entry for caching");
            }
        }

        Ok(entry)
    }
}

/// Converts one raw provider entry into the normalized model
///
/// Pure mapping: field-for-field, order preserved, no de-duplication. The
/// result's `word` is the normalized requested word, not the provider's
/// echo. Only the first of the provider's source URLs is kept.
pub fn normalize_entry(word: &str, api: ApiEntry) -> DictionaryEntry {
    let phonetics = api
        .phonetics
        .into_iter()
        .map(|p| Phonetic {
            text: non_empty(p.text),
            audio: non_empty(p.audio),
            source_url: non_empty(p.source_url),
        })
        .collect();

    let meanings = api
        .meanings
        .into_iter()
        .map(|m| Meaning {
            part_of_speech: m.part_of_speech,
            definitions: m
                .definitions
                .into_iter()
                .map(|d| Definition {
                    definition: d.definition,
                    example: non_empty(d.example),
                    synonyms: d.synonyms,
                    antonyms: d.antonyms,
                })
                .collect(),
            synonyms: m.synonyms,
            antonyms: m.antonyms,
        })
        .collect();

    DictionaryEntry {
        word: word.to_string(),
        phonetics,
        meanings,
        source_url: api.source_urls.into_iter().next(),
    }
}

/// The provider uses empty strings for absent optional fields
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dict::provider::{ApiDefinition, ApiMeaning, ApiPhonetic};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};
    use tempfile::TempDir;

    /// What the fake provider should answer with
    #[derive(Clone)]
    enum FakeResponse {
        Entries(Vec<ApiEntry>),
        NotFound,
        Unreachable,
    }

    /// Test double recording every request made to it
    struct FakeProvider {
        response: FakeResponse,
        calls: Arc<AtomicUsize>,
        requests: Arc<Mutex<Vec<String>>>,
    }

    impl FakeProvider {
        fn new(response: FakeResponse) -> (Self, Arc<AtomicUsize>, Arc<Mutex<Vec<String>>>) {
            let calls = Arc::new(AtomicUsize::new(0));
            let requests = Arc::new(Mutex::new(Vec::new()));
            let provider = Self {
                response,
                calls: calls.clone(),
                requests: requests.clone(),
            };
            (provider, calls, requests)
        }
    }

    #[async_trait]
    impl DictionaryProvider for FakeProvider {
        async fn fetch_entries(&self, word: &str) -> Result<Vec<ApiEntry>, ProviderError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.requests.lock().unwrap().push(word.to_string());
            match &self.response {
                FakeResponse::Entries(entries) => Ok(entries.clone()),
                FakeResponse::NotFound => Err(ProviderError::NotFound),
                FakeResponse::Unreachable => {
                    Err(ProviderError::Status(reqwest::StatusCode::BAD_GATEWAY))
                }
            }
        }

        fn source_tag(&self) -> &'static str {
            "fakeprovider"
        }
    }

    fn hello_api_entry() -> ApiEntry {
        ApiEntry {
            word: "hello".to_string(),
            phonetics: vec![
                ApiPhonetic {
                    text: Some("/həˈləʊ/".to_string()),
                    audio: Some("https://example.com/hello-au.mp3".to_string()),
                    source_url: None,
                },
                ApiPhonetic {
                    text: Some("/həˈloʊ/".to_string()),
                    audio: Some(String::new()),
                    source_url: None,
                },
            ],
            meanings: vec![ApiMeaning {
                part_of_speech: "noun".to_string(),
                definitions: vec![
                    ApiDefinition {
                        definition: "A greeting.".to_string(),
                        example: None,
                        synonyms: vec!["greeting".to_string()],
                        antonyms: vec![],
                    },
                    ApiDefinition {
                        definition: "A call for attention.".to_string(),
                        example: Some("I shouted a hello.".to_string()),
                        synonyms: vec![],
                        antonyms: vec![],
                    },
                ],
                synonyms: vec!["greeting".to_string()],
                antonyms: vec!["goodbye".to_string()],
            }],
            source_urls: vec![
                "https://en.wiktionary.org/wiki/hello".to_string(),
                "https://example.com/second".to_string(),
            ],
        }
    }

    fn test_store() -> (CacheStore, TempDir) {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let store = CacheStore::with_dir(temp_dir.path().to_path_buf());
        (store, temp_dir)
    }

    #[tokio::test]
    async fn test_lookup_returns_normalized_word() {
        let (store, _temp_dir) = test_store();
        let (provider, _calls, requests) =
            FakeProvider::new(FakeResponse::Entries(vec![hello_api_entry()]));
        let service = DictionaryService::new(provider, store);

        let entry = service.lookup("  Hello  ").await.expect("Lookup should succeed");

        assert_eq!(entry.word, "hello");
        assert_eq!(requests.lock().unwrap().as_slice(), ["hello"]);
    }

    #[tokio::test]
    async fn test_second_lookup_is_served_from_cache() {
        let (store, _temp_dir) = test_store();
        let (provider, calls, _requests) =
            FakeProvider::new(FakeResponse::Entries(vec![hello_api_entry()]));
        let service = DictionaryService::new(provider, store);

        let first = service.lookup("hello").await.expect("First lookup should succeed");
        let second = service.lookup("hello").await.expect("Second lookup should succeed");

        assert_eq!(calls.load(Ordering::SeqCst), 1, "Cache hit must not refetch");
        assert_eq!(first, second, "Cached entry should equal the original");
    }

    #[tokio::test]
    async fn test_differently_cased_inputs_share_a_cache_key() {
        let (store, _temp_dir) = test_store();
        let (provider, calls, _requests) =
            FakeProvider::new(FakeResponse::Entries(vec![hello_api_entry()]));
        let service = DictionaryService::new(provider, store);

        service.lookup(" Hello ").await.expect("Lookup should succeed");
        service.lookup("hello").await.expect("Lookup should succeed");

        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_empty_input_never_reaches_provider() {
        let (store, _temp_dir) = test_store();
        let (provider, calls, _requests) =
            FakeProvider::new(FakeResponse::Entries(vec![hello_api_entry()]));
        let service = DictionaryService::new(provider, store);

        for input in ["", "   ", "\t\n"] {
            let result = service.lookup(input).await;
            assert!(matches!(result, Err(LookupError::EmptyWord)));
        }

        assert_eq!(calls.load(Ordering::SeqCst), 0, "Provider must not be invoked");
    }

    #[tokio::test]
    async fn test_not_found_carries_word_and_caches_nothing() {
        let (store, _temp_dir) = test_store();
        let (provider, _calls, _requests) = FakeProvider::new(FakeResponse::NotFound);
        let service = DictionaryService::new(provider, store.clone());

        let result = service.lookup("zzzznotaword").await;

        match result {
            Err(LookupError::NotFound(word)) => assert_eq!(word, "zzzznotaword"),
            other => panic!("Expected NotFound, got {:?}", other.map(|e| e.word)),
        }
        assert!(
            store.get_if_valid("zzzznotaword").unwrap().is_none(),
            "A failed lookup must not be cached"
        );
    }

    #[tokio::test]
    async fn test_empty_provider_response_is_upstream_error_not_not_found() {
        let (store, _temp_dir) = test_store();
        let (provider, _calls, _requests) = FakeProvider::new(FakeResponse::Entries(vec![]));
        let service = DictionaryService::new(provider, store);

        let result = service.lookup("hollow").await;

        assert!(matches!(result, Err(LookupError::EmptyResponse)));
    }

    #[tokio::test]
    async fn test_provider_failure_is_upstream_error() {
        let (store, _temp_dir) = test_store();
        let (provider, _calls, _requests) = FakeProvider::new(FakeResponse::Unreachable);
        let service = DictionaryService::new(provider, store);

        let result = service.lookup("hello").await;

        assert!(matches!(result, Err(LookupError::Upstream(_))));
    }

    #[tokio::test]
    async fn test_normalization_preserves_order() {
        let (store, _temp_dir) = test_store();
        let (provider, _calls, _requests) =
            FakeProvider::new(FakeResponse::Entries(vec![hello_api_entry()]));
        let service = DictionaryService::new(provider, store);

        let entry = service.lookup("hello").await.expect("Lookup should succeed");

        assert_eq!(entry.phonetics.len(), 2);
        assert_eq!(entry.phonetics[0].text.as_deref(), Some("/həˈləʊ/"));
        assert_eq!(entry.phonetics[1].text.as_deref(), Some("/həˈloʊ/"));
        // Empty audio string normalizes to absent
        assert!(entry.phonetics[1].audio.is_none());

        assert_eq!(entry.meanings.len(), 1);
        let meaning = &entry.meanings[0];
        assert_eq!(meaning.part_of_speech, "noun");
        assert_eq!(meaning.definitions.len(), 2);
        assert_eq!(meaning.definitions[0].definition, "A greeting.");
        assert_eq!(meaning.definitions[1].definition, "A call for attention.");
        assert_eq!(
            meaning.definitions[1].example.as_deref(),
            Some("I shouted a hello.")
        );
    }

    #[tokio::test]
    async fn test_only_first_provider_entry_is_used() {
        let mut second = hello_api_entry();
        second.meanings.clear();
        second.source_urls = vec!["https://example.com/homograph".to_string()];

        let (store, _temp_dir) = test_store();
        let (provider, _calls, _requests) =
            FakeProvider::new(FakeResponse::Entries(vec![hello_api_entry(), second]));
        let service = DictionaryService::new(provider, store);

        let entry = service.lookup("hello").await.expect("Lookup should succeed");

        assert_eq!(entry.meanings.len(), 1, "Second homograph must be discarded");
        assert_eq!(
            entry.source_url.as_deref(),
            Some("https://en.wiktionary.org/wiki/hello"),
            "Source URL comes from the first entry's first URL"
        );
    }

    #[tokio::test]
    async fn test_cache_write_failure_does_not_fail_lookup() {
        // A directory squatting on the store's temporary file path makes
        // every write fail while reads stay plain misses
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        std::fs::create_dir_all(temp_dir.path().join("hello.json.tmp"))
            .expect("Should create blocking directory");
        let store = CacheStore::with_dir(temp_dir.path().to_path_buf());

        let (provider, calls, _requests) =
            FakeProvider::new(FakeResponse::Entries(vec![hello_api_entry()]));
        let service = DictionaryService::new(provider, store);

        let entry = service.lookup("hello").await.expect("Lookup should still succeed");
        assert_eq!(entry.word, "hello");

        // Nothing was cached, so a retry fetches again
        service.lookup("hello").await.expect("Retry should succeed");
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_corrupt_cached_payload_is_surfaced_not_refetched() {
        let (store, _temp_dir) = test_store();
        store
            .upsert("hello", "{ not an entry }", "fakeprovider", Duration::days(7))
            .expect("Upsert should succeed");

        let (provider, calls, _requests) =
            FakeProvider::new(FakeResponse::Entries(vec![hello_api_entry()]));
        let service = DictionaryService::new(provider, store);

        let result = service.lookup("hello").await;

        match result {
            Err(LookupError::CorruptCache { word, .. }) => assert_eq!(word, "hello"),
            other => panic!("Expected CorruptCache, got {:?}", other.map(|e| e.word)),
        }
        assert_eq!(
            calls.load(Ordering::SeqCst),
            0,
            "Corrupt cache must not fall through to the provider"
        );
    }

    #[tokio::test]
    async fn test_corrupt_record_file_surfaces_as_cache_error() {
        let (store, temp_dir) = test_store();
        std::fs::create_dir_all(temp_dir.path()).unwrap();
        std::fs::write(temp_dir.path().join("hello.json"), "garbage").unwrap();

        let (provider, calls, _requests) =
            FakeProvider::new(FakeResponse::Entries(vec![hello_api_entry()]));
        let service = DictionaryService::new(provider, store);

        let result = service.lookup("hello").await;

        assert!(matches!(result, Err(LookupError::Cache(_))));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_normalize_entry_maps_fields_one_to_one() {
        let entry = normalize_entry("hello", hello_api_entry());

        assert_eq!(entry.word, "hello");
        assert_eq!(entry.meanings[0].synonyms, vec!["greeting"]);
        assert_eq!(entry.meanings[0].antonyms, vec!["goodbye"]);
        assert_eq!(entry.meanings[0].definitions[0].synonyms, vec!["greeting"]);
        assert_eq!(
            entry.source_url.as_deref(),
            Some("https://en.wiktionary.org/wiki/hello")
        );
    }

    #[test]
    fn test_normalize_entry_without_source_urls() {
        let mut api = hello_api_entry();
        api.source_urls.clear();

        let entry = normalize_entry("hello", api);

        assert!(entry.source_url.is_none());
    }
}
