use crate::tui::{self, TerminalTitle};
use color_eyre::Result;
use popcorn_config::{Config, PathManager};
use popcorn_core::{App, JsonFileStore};
use popcorn_sources::{CatalogSource, OmdbClient};
use std::sync::Arc;
use tracing::info;

pub async fn run_browse(config: &Config, paths: &PathManager) -> Result<()> {
    let source: Arc<dyn CatalogSource> = Arc::new(OmdbClient::from_config(&config.catalog));
    let store = JsonFileStore::new(config.watched_file(paths));
    info!(
        source = source.source_name(),
        watched_file = %store.path().display(),
        debounce_ms = config.search.debounce_ms,
        "Starting browser"
    );

    let (events_tx, events_rx) = popcorn_core::channel();
    let app = App::new(source, store, TerminalTitle, &config.search, events_tx);
    tui::run(app, events_rx)
}
