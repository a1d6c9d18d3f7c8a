use std::env;
use std::time::Duration;

use serde::{Deserialize, Serialize};

fn default_base_url() -> String {
    "https://api.dictionaryapi.dev/api/v2/entries".to_string()
}

fn default_timeout_ms() -> u64 {
    10_000
}

/// Outbound dictionary service settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    /// Language code and word are appended as path segments
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Upper bound for a single lookup, connect through body
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl NetworkConfig {
    pub fn new() -> Self {
        let base_url = env::var("DICTIONARY_BASE_URL").unwrap_or_else(|_| default_base_url());

        let timeout_ms = env::var("LOOKUP_TIMEOUT_MS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(default_timeout_ms);

        Self {
            base_url,
            timeout_ms,
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_ms: default_timeout_ms(),
        }
    }
}
