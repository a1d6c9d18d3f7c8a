use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::Context;
use ordbok_config::Config;
use serde_json::Value;

const DEFAULT_CONFIG_FILE: &str = "config.json";

/// Load config from `path`, else `config.json` in the working directory.
/// Keys present in the file win over the environment, absent keys keep the
/// environment or default value.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    load_config_over(path, Config::new())
}

fn load_config_over(path: Option<&Path>, base: Config) -> anyhow::Result<Config> {
    if let Some(path) = path {
        return load_config_file(path, base);
    }

    let default_path = Path::new(DEFAULT_CONFIG_FILE);
    if default_path.exists() {
        load_config_file(default_path, base)
    } else {
        tracing::debug!("No {} found, using environment", DEFAULT_CONFIG_FILE);
        Ok(base)
    }
}

fn load_config_file(path: &Path, base: Config) -> anyhow::Result<Config> {
    tracing::info!("Loading config from {}", path.display());
    let file =
        File::open(path).with_context(|| format!("Failed to open config {}", path.display()))?;
    let reader = BufReader::new(file);
    let overrides: Value = serde_json::from_reader(reader)
        .with_context(|| format!("Failed to parse config {}", path.display()))?;

    let mut merged = serde_json::to_value(base).context("Failed to serialize base config")?;
    merge(&mut merged, overrides);
    serde_json::from_value(merged)
        .with_context(|| format!("Failed to parse config {}", path.display()))
}

fn merge(base: &mut Value, overrides: Value) {
    match (base, overrides) {
        (Value::Object(base), Value::Object(overrides)) => {
            for (key, value) in overrides {
                merge(base.entry(key).or_insert(Value::Null), value);
            }
        }
        (base, value) => *base = value,
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;

    use super::*;

    fn temp_file(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("ordbok-{}-{}.json", name, std::process::id()));
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn loads_partial_file() {
        let path = temp_file(
            "partial",
            r#"{ "dictionary": { "language": "en" }, "network": { "timeout_ms": 1500 } }"#,
        );

        let config = load_config_over(Some(&path), Config::default()).unwrap();
        fs::remove_file(&path).ok();

        assert_eq!(config.dictionary.language, "en");
        assert_eq!(config.network.timeout_ms, 1500);
        assert_eq!(
            config.network.base_url,
            "https://api.dictionaryapi.dev/api/v2/entries"
        );
    }

    #[test]
    fn invalid_file_is_an_error() {
        let path = temp_file("invalid", "{ not json");

        let err = load_config(Some(&path)).unwrap_err();
        fs::remove_file(&path).ok();

        assert!(err.to_string().contains("Failed to parse config"));
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let path = std::env::temp_dir().join("ordbok-definitely-missing.json");
        assert!(load_config(Some(&path)).is_err());
    }

    #[test]
    fn file_keys_override_base_and_absent_keys_keep_it() {
        let path = temp_file("layered", r#"{ "network": { "timeout_ms": 2500 } }"#);
        let mut base = Config::default();
        base.dictionary.language = "en".to_string();
        base.network.timeout_ms = 900;

        let config = load_config_over(Some(&path), base).unwrap();
        fs::remove_file(&path).ok();

        assert_eq!(config.dictionary.language, "en");
        assert_eq!(config.network.timeout_ms, 2500);
    }

    #[test]
    fn wrongly_typed_key_is_an_error() {
        let path = temp_file("mistyped", r#"{ "network": { "timeout_ms": "soon" } }"#);

        let err = load_config_over(Some(&path), Config::default()).unwrap_err();
        fs::remove_file(&path).ok();

        assert!(err.to_string().contains("Failed to parse config"));
    }
}
