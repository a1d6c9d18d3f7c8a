mod client;
mod select;
mod types;

use std::time::Duration;

pub use client::DictionaryApiClient;
pub use select::{Selection, select_first};
pub use types::Entry;

/// Remote dictionary interface
#[async_trait::async_trait]
pub trait DictionaryProvider: Send + Sync {
    /// Fetch every entry the service has for `word` in `language`
    async fn lookup(&self, word: &str, language: &str) -> Result<Vec<Entry>, LookupError>;

    /// Provider metadata
    fn metadata(&self) -> ProviderMetadata;
}

#[derive(Debug, Clone)]
pub struct ProviderMetadata {
    pub name: String,
    pub base_url: String,
}

#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    #[error("HTTP {status}: {status_text}")]
    Status { status: u16, status_text: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Failed to parse response: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Lookup timed out after {0:?}")]
    Timeout(Duration),

    #[error("Malformed entry: {0}")]
    Malformed(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}
