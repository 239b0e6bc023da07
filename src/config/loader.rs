use super::{get_global_config_dir, Config};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Resolves configuration from defaults, a TOML file and the environment
pub struct ConfigLoader {
    explicit_path: Option<PathBuf>,
    default_path: Option<PathBuf>,
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self {
            explicit_path: None,
            default_path: get_global_config_dir()
                .ok()
                .map(|dir| dir.join("config.toml")),
        }
    }

    /// Use `path` instead of the per-user config file. The file must exist.
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.explicit_path = Some(path.into());
        self
    }

    /// Override the per-user config location (used when no explicit path is set)
    pub fn with_default_path(mut self, path: Option<PathBuf>) -> Self {
        self.default_path = path;
        self
    }

    /// Load the file layer and then apply process environment overrides
    pub fn load(&self) -> Result<Config> {
        self.load_with_env(|key| std::env::var(key).ok())
    }

    pub fn load_with_env<F>(&self, lookup: F) -> Result<Config>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match (&self.explicit_path, &self.default_path) {
            (Some(path), _) => Self::read_file(path)?,
            (None, Some(path)) if path.exists() => Self::read_file(path)?,
            _ => {
                debug!("No configuration file found, using defaults");
                Config::new()
            }
        };

        config.merge_env_with(lookup);
        Ok(config)
    }

    fn read_file(path: &Path) -> Result<Config> {
        debug!("Loading configuration from {}", path.display());
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Invalid config file {}", path.display()))?;
        Ok(config)
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}
