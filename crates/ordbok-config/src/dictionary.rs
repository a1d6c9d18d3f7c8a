use std::env;

use serde::{Deserialize, Serialize};

fn default_language() -> String {
    "sv".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DictionaryConfig {
    /// Two-letter code used as the first path segment
    #[serde(default = "default_language")]
    pub language: String,
}

impl DictionaryConfig {
    pub fn new() -> Self {
        let language = env::var("DICTIONARY_LANGUAGE").unwrap_or_else(|_| default_language());

        Self { language }
    }
}

impl Default for DictionaryConfig {
    fn default() -> Self {
        Self {
            language: default_language(),
        }
    }
}
