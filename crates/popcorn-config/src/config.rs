use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use crate::paths::PathManager;

/// Key shipped with the app; users can replace it with their own
pub const DEFAULT_API_KEY: &str = "8fe69795";
pub const DEFAULT_BASE_URL: &str = "http://www.omdbapi.com/";
pub const DEFAULT_DEBOUNCE_MS: u64 = 500;
pub const DEFAULT_MIN_QUERY_LEN: usize = 3;

/// Environment variable that overrides `catalog.api_key`
pub const API_KEY_ENV: &str = "POPCORN_API_KEY";

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("catalog.api_key must not be empty")]
    EmptyApiKey,
    #[error("catalog.base_url must not be empty")]
    EmptyBaseUrl,
    #[error("search.debounce_ms must be greater than zero")]
    ZeroDebounce,
    #[error("search.min_query_len must be greater than zero")]
    ZeroFloor,
    #[error("Unknown config key: {0}")]
    UnknownKey(String),
    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub search: SearchOptions,
    #[serde(default)]
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CatalogConfig {
    #[serde(default = "default_api_key")]
    pub api_key: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchOptions {
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
    #[serde(default = "default_min_query_len")]
    pub min_query_len: usize,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct StorageConfig {
    /// Overrides `<data_dir>/watched.json`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub watched_file: Option<PathBuf>,
}

fn default_api_key() -> String {
    DEFAULT_API_KEY.to_string()
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_debounce_ms() -> u64 {
    DEFAULT_DEBOUNCE_MS
}

fn default_min_query_len() -> usize {
    DEFAULT_MIN_QUERY_LEN
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            api_key: default_api_key(),
            base_url: default_base_url(),
        }
    }
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
            min_query_len: default_min_query_len(),
        }
    }
}

impl SearchOptions {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

impl Config {
    pub fn load_from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load the config file if present, otherwise defaults; env overrides applied last
    pub fn load_or_default(paths: &PathManager) -> anyhow::Result<Self> {
        let path = paths.config_file();
        let mut config = if path.exists() {
            Self::load_from_file(&path)?
        } else {
            Self::default()
        };
        config.apply_env_overrides();
        Ok(config)
    }

    pub fn save_to_file(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn apply_env_overrides(&mut self) {
        if let Ok(key) = std::env::var(API_KEY_ENV) {
            if !key.trim().is_empty() {
                self.catalog.api_key = key.trim().to_string();
            }
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.catalog.api_key.trim().is_empty() {
            return Err(ConfigError::EmptyApiKey);
        }
        if self.catalog.base_url.trim().is_empty() {
            return Err(ConfigError::EmptyBaseUrl);
        }
        if self.search.debounce_ms == 0 {
            return Err(ConfigError::ZeroDebounce);
        }
        if self.search.min_query_len == 0 {
            return Err(ConfigError::ZeroFloor);
        }
        Ok(())
    }

    /// Resolve where the watched list lives
    pub fn watched_file(&self, paths: &PathManager) -> PathBuf {
        self.storage
            .watched_file
            .clone()
            .unwrap_or_else(|| paths.watched_file())
    }

    /// Set a single value by its dotted key, as used by `popcorn config set`
    pub fn set_value(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let invalid = || ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
        };

        match key {
            "catalog.api_key" => self.catalog.api_key = value.trim().to_string(),
            "catalog.base_url" => self.catalog.base_url = value.trim().to_string(),
            "search.debounce_ms" => {
                self.search.debounce_ms = value.trim().parse().map_err(|_| invalid())?;
            }
            "search.min_query_len" => {
                self.search.min_query_len = value.trim().parse().map_err(|_| invalid())?;
            }
            "storage.watched_file" => {
                self.storage.watched_file = if value.trim().is_empty() {
                    None
                } else {
                    Some(PathBuf::from(value.trim()))
                };
            }
            _ => return Err(ConfigError::UnknownKey(key.to_string())),
        }
        Ok(())
    }

    /// Show the api key with all but the last characters masked
    pub fn masked_api_key(&self) -> String {
        let key = &self.catalog.api_key;
        let visible = key.chars().count().min(2);
        let hidden = key.chars().count() - visible;
        let tail: String = key.chars().skip(hidden).collect();
        format!("{}{}", "*".repeat(hidden), tail)
    }
}
