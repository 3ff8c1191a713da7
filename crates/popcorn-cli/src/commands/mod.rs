pub mod browse;
pub mod config;
pub mod prompts;
pub mod search;
pub mod show;
pub mod spinner;
pub mod watched;

use color_eyre::eyre::{eyre, WrapErr};
use color_eyre::Result;
use popcorn_config::{Config, PathManager};
use popcorn_core::{JsonFileStore, WatchedListModel};

/// Load and validate the config every command runs with
pub fn load_config(paths: &PathManager) -> Result<Config> {
    let config = Config::load_or_default(paths)
        .map_err(|e| eyre!("{}", e))
        .wrap_err_with(|| format!("Failed to load config from {}", paths.config_file().display()))?;
    config.validate()?;
    Ok(config)
}

pub fn open_watched_list(config: &Config, paths: &PathManager) -> WatchedListModel<JsonFileStore> {
    WatchedListModel::load(JsonFileStore::new(config.watched_file(paths)))
}
