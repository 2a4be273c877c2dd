//! Free Dictionary API client
//!
//! Fetches raw lexical entries from api.dictionaryapi.dev. The wire shapes
//! here mirror the provider's response exactly; conversion into the
//! normalized internal model happens in the lookup service.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use thiserror::Error;

/// Base URL for the Free Dictionary API
const FREE_DICT_API_URL: &str = "https://api.dictionaryapi.dev/api/v2/entries/en";

/// Provenance tag recorded with cached payloads from this provider
const SOURCE_TAG: &str = "freedictionaryapi";

/// Upper bound on a single upstream request
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Errors that can occur when fetching from the upstream provider
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The provider reports the word does not exist
    #[error("word not found")]
    NotFound,

    /// HTTP transport failed
    #[error("API request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The provider returned an unexpected status
    #[error("API returned status {0}")]
    Status(StatusCode),

    /// The response body did not match the expected shape
    #[error("failed to parse API response: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// A raw lexical entry as returned by the provider
///
/// The provider returns a list of these per word, one per homograph.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiEntry {
    pub word: String,
    #[serde(default)]
    pub phonetics: Vec<ApiPhonetic>,
    #[serde(default)]
    pub meanings: Vec<ApiMeaning>,
    #[serde(default, rename = "sourceUrls")]
    pub source_urls: Vec<String>,
}

/// A raw phonetic entry from the provider
#[derive(Debug, Clone, Deserialize)]
pub struct ApiPhonetic {
    pub text: Option<String>,
    pub audio: Option<String>,
    #[serde(rename = "sourceUrl")]
    pub source_url: Option<String>,
}

/// A raw meaning from the provider
#[derive(Debug, Clone, Deserialize)]
pub struct ApiMeaning {
    #[serde(rename = "partOfSpeech")]
    pub part_of_speech: String,
    #[serde(default)]
    pub definitions: Vec<ApiDefinition>,
    #[serde(default)]
    pub synonyms: Vec<String>,
    #[serde(default)]
    pub antonyms: Vec<String>,
}

/// A raw definition from the provider
#[derive(Debug, Clone, Deserialize)]
pub struct ApiDefinition {
    pub definition: String,
    pub example: Option<String>,
    #[serde(default)]
    pub synonyms: Vec<String>,
    #[serde(default)]
    pub antonyms: Vec<String>,
}

/// Upstream dictionary data source
///
/// Injected into the lookup service at construction so tests can substitute
/// a fake that counts calls or fails on demand.
#[async_trait]
pub trait DictionaryProvider: Send + Sync {
    /// Fetches all lexical entries the provider knows for a normalized word
    async fn fetch_entries(&self, word: &str) -> Result<Vec<ApiEntry>, ProviderError>;

    /// Provenance tag stored alongside cached payloads
    fn source_tag(&self) -> &'static str;
}

/// Client for the Free Dictionary API
#[derive(Debug, Clone)]
pub struct FreeDictionaryClient {
    /// HTTP client for making requests
    http_client: Client,
    /// Base URL for the API (allows override for testing)
    base_url: String,
}

impl FreeDictionaryClient {
    /// Creates a new client with default configuration
    pub fn new() -> Self {
        Self {
            http_client: Client::new(),
            base_url: FREE_DICT_API_URL.to_string(),
        }
    }

}

impl Default for FreeDictionaryClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DictionaryProvider for FreeDictionaryClient {
    async fn fetch_entries(&self, word: &str) -> Result<Vec<ApiEntry>, ProviderError> {
        let url = format!("{}/{}", self.base_url, urlencoded(word));

        let response = self
            .http_client
            .get(&url)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(ProviderError::NotFound);
        }
        if !response.status().is_success() {
            return Err(ProviderError::Status(response.status()));
        }

        let body = response.text().await?;
        let entries: Vec<ApiEntry> = serde_json::from_str(&body)?;

        Ok(entries)
    }

    fn source_tag(&self) -> &'static str {
        SOURCE_TAG
    }
}

/// URL-encodes a word for use as a path segment
fn urlencoded(s: &str) -> String {
    s.replace('%', "%25")
        .replace(' ', "%20")
        .replace('/', "%2F")
        .replace('?', "%3F")
        .replace('#', "%23")
}
