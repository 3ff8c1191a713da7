use popcorn_models::WatchedEntry;
use thiserror::Error;
use tracing::{info, warn};
use crate::store::WatchedStore;

#[derive(Debug, Error, PartialEq)]
pub enum WatchedError {
    #[error("{0} is already on the watched list")]
    Duplicate(String),
}

/// Aggregates over the watched list, computed on demand
#[derive(Debug, Clone, PartialEq)]
pub struct WatchedSummary {
    pub count: usize,
    pub avg_imdb_rating: f64,
    pub avg_user_rating: f64,
    pub total_runtime_minutes: u64,
}

/// Mean of `values`; 0 for an empty slice
pub fn average(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sum of runtimes; missing runtimes count as 0
pub fn total_runtime<I>(runtimes: I) -> u64
where
    I: IntoIterator<Item = Option<u32>>,
{
    runtimes.into_iter().map(|m| u64::from(m.unwrap_or(0))).sum()
}

/// Minutes below an hour print as-is; longer runtimes print in hours with
/// two decimals, "hrs" only once past two hours.
pub fn runtime_postfix(minutes: u64) -> String {
    if minutes < 60 {
        return minutes.to_string();
    }
    let hours = minutes as f64 / 60.0;
    let unit = if hours > 2.0 { "hrs" } else { "hr" };
    format!("{:.2} {}", hours, unit)
}

/// Integers print without decimals, everything else rounded to two places
pub fn convert_decimal(value: f64) -> String {
    if value.fract() == 0.0 {
        return format!("{}", value as i64);
    }
    format!("{}", (value * 100.0).round() / 100.0)
}

/// The user's watched movies, kept in insertion order and written through to
/// a [`WatchedStore`] after every change.
pub struct WatchedListModel<S: WatchedStore> {
    entries: Vec<WatchedEntry>,
    store: S,
}

impl<S: WatchedStore> WatchedListModel<S> {
    /// Read the list from `store`; anything unreadable starts an empty list
    pub fn load(store: S) -> Self {
        let entries = match store.load() {
            Ok(Some(entries)) => entries,
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!("Failed to load watched list: {}. Starting with an empty list.", e);
                Vec::new()
            }
        };
        Self { entries, store }
    }

    pub fn entries(&self) -> &[WatchedEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, catalog_id: &str) -> bool {
        self.entries.iter().any(|e| e.catalog_id == catalog_id)
    }

    pub fn get(&self, catalog_id: &str) -> Option<&WatchedEntry> {
        self.entries.iter().find(|e| e.catalog_id == catalog_id)
    }

    pub fn user_rating_for(&self, catalog_id: &str) -> Option<u8> {
        self.get(catalog_id).map(|e| e.user_rating)
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn add(&mut self, entry: WatchedEntry) -> Result<(), WatchedError> {
        if self.contains(&entry.catalog_id) {
            return Err(WatchedError::Duplicate(entry.catalog_id));
        }
        info!(catalog_id = %entry.catalog_id, title = %entry.title, rating = entry.user_rating, "Added to watched list");
        self.entries.push(entry);
        self.persist();
        Ok(())
    }

    /// Remove every entry with `catalog_id`; returns how many went
    pub fn remove(&mut self, catalog_id: &str) -> usize {
        let before = self.entries.len();
        self.entries.retain(|e| e.catalog_id != catalog_id);
        let removed = before - self.entries.len();
        info!(catalog_id, removed, "Removed from watched list");
        self.persist();
        removed
    }

    pub fn summary(&self) -> WatchedSummary {
        let imdb: Vec<f64> = self.entries.iter().map(|e| e.imdb_rating.unwrap_or(0.0)).collect();
        let user: Vec<f64> = self.entries.iter().map(|e| f64::from(e.user_rating)).collect();
        WatchedSummary {
            count: self.entries.len(),
            avg_imdb_rating: average(&imdb),
            avg_user_rating: average(&user),
            total_runtime_minutes: total_runtime(self.entries.iter().map(|e| e.runtime_minutes)),
        }
    }

    fn persist(&mut self) {
        // The in-memory list stays authoritative when the write fails
        if let Err(e) = self.store.save(&self.entries) {
            warn!("Failed to persist watched list: {}", e);
        }
    }
}
