use anyhow::{anyhow, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

pub mod loader;

pub use loader::ConfigLoader;

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Environment variables checked for the API key, in priority order
pub const API_KEY_VARS: [&str; 3] = ["ECOSCI_API_KEY", "GEMINI_API_KEY", "API_KEY"];

/// Get the directory holding the user's EcoSci configuration
pub fn get_global_config_dir() -> Result<PathBuf> {
    ProjectDirs::from("org", "ecosci", "ecosci")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| anyhow!("Could not determine home directory"))
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub backend: BackendConfig,
    /// Curriculum data set to load instead of the built-in one
    pub data_file: Option<PathBuf>,
    pub log_level: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    /// Upper bound on a single generation call; 0 disables the limit
    pub timeout_secs: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl BackendConfig {
    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_secs > 0).then_some(Duration::from_secs(self.timeout_secs))
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply overrides from an environment lookup
    pub fn merge_env_with<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        if let Some(api_key) = API_KEY_VARS.iter().find_map(|key| non_empty(*key)) {
            self.backend.api_key = Some(api_key);
        }

        if let Some(model) = non_empty("ECOSCI_MODEL") {
            self.backend.model = model;
        }

        if let Some(base_url) = non_empty("ECOSCI_BASE_URL") {
            self.backend.base_url = base_url;
        }

        if let Some(timeout) = non_empty("ECOSCI_TIMEOUT_SECS") {
            match timeout.trim().parse::<u64>() {
                Ok(value) => self.backend.timeout_secs = value,
                Err(_) => tracing::warn!("Ignoring invalid ECOSCI_TIMEOUT_SECS: {}", timeout),
            }
        }

        if let Some(data_file) = non_empty("ECOSCI_DATA_FILE") {
            self.data_file = Some(PathBuf::from(data_file));
        }

        if let Some(log_level) = non_empty("ECOSCI_LOG") {
            self.log_level = Some(log_level);
        }
    }

    pub fn has_api_key(&self) -> bool {
        self.backend
            .api_key
            .as_deref()
            .is_some_and(|key| !key.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::new();
        assert_eq!(config.backend.model, "gemini-2.5-flash");
        assert_eq!(config.backend.timeout(), Some(Duration::from_secs(120)));
        assert!(!config.has_api_key());
        assert!(config.data_file.is_none());
    }

    #[test]
    fn test_api_key_priority() {
        let mut config = Config::new();
        config.merge_env_with(env(&[("API_KEY", "generic"), ("GEMINI_API_KEY", "gemini")]));
        assert_eq!(config.backend.api_key.as_deref(), Some("gemini"));

        config.merge_env_with(env(&[("ECOSCI_API_KEY", "mine"), ("API_KEY", "generic")]));
        assert_eq!(config.backend.api_key.as_deref(), Some("mine"));
    }

    #[test]
    fn test_blank_env_values_are_ignored() {
        let mut config = Config::new();
        config.backend.api_key = Some("from-file".to_string());
        config.merge_env_with(env(&[("ECOSCI_API_KEY", "  "), ("ECOSCI_MODEL", "")]));
        assert_eq!(config.backend.api_key.as_deref(), Some("from-file"));
        assert_eq!(config.backend.model, DEFAULT_MODEL);
    }

    #[test]
    fn test_env_overrides() {
        let mut config = Config::new();
        config.merge_env_with(env(&[
            ("ECOSCI_MODEL", "gemini-2.5-pro"),
            ("ECOSCI_BASE_URL", "http://localhost:9000"),
            ("ECOSCI_TIMEOUT_SECS", "0"),
            ("ECOSCI_DATA_FILE", "/tmp/units.yaml"),
            ("ECOSCI_LOG", "debug"),
        ]));
        assert_eq!(config.backend.model, "gemini-2.5-pro");
        assert_eq!(config.backend.base_url, "http://localhost:9000");
        assert_eq!(config.backend.timeout(), None);
        assert_eq!(config.data_file, Some(PathBuf::from("/tmp/units.yaml")));
        assert_eq!(config.log_level.as_deref(), Some("debug"));
    }

    #[test]
    fn test_invalid_timeout_keeps_previous_value() {
        let mut config = Config::new();
        config.merge_env_with(env(&[("ECOSCI_TIMEOUT_SECS", "soon")]));
        assert_eq!(config.backend.timeout_secs, DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: Config = toml::from_str(
            r#"
[backend]
model = "gemini-2.0-flash"
"#,
        )
        .unwrap();
        assert_eq!(config.backend.model, "gemini-2.0-flash");
        assert_eq!(config.backend.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.backend.timeout_secs, DEFAULT_TIMEOUT_SECS);
    }
}
