use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use crate::detail::MovieDetail;
use crate::numeric::{lenient_minutes, lenient_rating, lenient_user_rating};

/// A movie the user rated and confirmed onto their watched list.
///
/// Serialized with the same camelCase keys the browser slot used, so an
/// exported list loads unchanged. `catalog_id` is the unique key.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WatchedEntry {
    #[serde(rename = "imdbId")]
    pub catalog_id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub year: String,
    #[serde(rename = "poster", default)]
    pub poster_url: Option<String>,
    #[serde(default, deserialize_with = "lenient_rating")]
    pub imdb_rating: Option<f64>,
    #[serde(rename = "runtime", default, deserialize_with = "lenient_minutes")]
    pub runtime_minutes: Option<u32>,
    #[serde(default, deserialize_with = "lenient_user_rating")]
    pub user_rating: u8, // 0-10
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub added_at: Option<DateTime<Utc>>,
}

impl WatchedEntry {
    /// Build the entry confirmed from an open detail view
    pub fn from_detail(detail: &MovieDetail, user_rating: u8) -> Self {
        Self {
            catalog_id: detail.catalog_id.clone(),
            title: detail.title.clone(),
            year: detail.year.clone(),
            poster_url: detail.poster_url.clone(),
            imdb_rating: detail.imdb_rating,
            runtime_minutes: detail.runtime_minutes,
            user_rating: user_rating.min(10),
            added_at: Some(Utc::now()),
        }
    }

    pub fn poster_or_placeholder(&self) -> &str {
        self.poster_url.as_deref().unwrap_or(crate::POSTER_PLACEHOLDER)
    }
}
