use std::env;

use serde::{Deserialize, Serialize};

use self::audio::AudioConfig;
use self::dictionary::DictionaryConfig;
use self::network::NetworkConfig;
use self::ui::UiConfig;

pub mod audio;
pub mod dictionary;
pub mod network;
pub mod ui;

fn default_channel_capacity() -> usize {
    64
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub network: NetworkConfig,
    pub dictionary: DictionaryConfig,
    pub audio: AudioConfig,
    pub ui: UiConfig,

    /// Capacity of the app <-> ui channels
    #[serde(default = "default_channel_capacity")]
    pub channel_capacity: usize,
}

impl Config {
    /// Defaults overridden by environment variables
    pub fn new() -> Self {
        let channel_capacity = env::var("CHANNEL_CAPACITY")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(default_channel_capacity);

        Config {
            network: NetworkConfig::new(),
            dictionary: DictionaryConfig::new(),
            audio: AudioConfig::new(),
            ui: UiConfig::default(),

            channel_capacity,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            network: NetworkConfig::default(),
            dictionary: DictionaryConfig::default(),
            audio: AudioConfig::default(),
            ui: UiConfig::default(),
            channel_capacity: default_channel_capacity(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_json_uses_defaults() {
        let config: Config = serde_json::from_str("{}").unwrap();

        assert_eq!(config.dictionary.language, "sv");
        assert_eq!(
            config.network.base_url,
            "https://api.dictionaryapi.dev/api/v2/entries"
        );
        assert_eq!(config.network.timeout_ms, 10_000);
        assert!(config.audio.enabled);
        assert_eq!(config.channel_capacity, 64);
    }

    #[test]
    fn partial_sections_keep_remaining_defaults() {
        let config: Config = serde_json::from_str(
            r#"{ "dictionary": { "language": "en" }, "audio": { "enabled": false } }"#,
        )
        .unwrap();

        assert_eq!(config.dictionary.language, "en");
        assert!(!config.audio.enabled);
        assert_eq!(config.audio.player, "mpv");
        assert_eq!(config.network.timeout_ms, 10_000);
    }

    #[test]
    fn timeout_as_duration() {
        let mut config = Config::default();
        config.network.timeout_ms = 250;
        assert_eq!(config.network.timeout().as_millis(), 250);
    }
}
