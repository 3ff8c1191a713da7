pub mod config;
pub mod paths;

pub use config::{CatalogConfig, Config, ConfigError, SearchOptions, StorageConfig, API_KEY_ENV, DEFAULT_API_KEY, DEFAULT_BASE_URL, DEFAULT_DEBOUNCE_MS, DEFAULT_MIN_QUERY_LEN};
pub use paths::{PathManager, BASE_DIR_ENV};
