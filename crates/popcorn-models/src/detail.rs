use serde::{Deserialize, Serialize};

/// Full record for the currently selected movie
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct MovieDetail {
    pub catalog_id: String,
    pub title: String,
    pub year: String,
    pub poster_url: Option<String>,
    pub runtime: String, // Raw catalog text, e.g. "148 min"
    pub runtime_minutes: Option<u32>,
    pub imdb_rating: Option<f64>,
    pub plot: String,
    pub released: String,
    pub actors: String,
    pub director: String,
    pub genre: String,
}

impl MovieDetail {
    pub fn poster_or_placeholder(&self) -> &str {
        self.poster_url.as_deref().unwrap_or(crate::POSTER_PLACEHOLDER)
    }

    /// Rating as the catalog would print it
    pub fn imdb_rating_label(&self) -> String {
        match self.imdb_rating {
            Some(rating) => format!("{}", rating),
            None => "N/A".to_string(),
        }
    }
}
