use serde::{Deserialize, Serialize};

/// One row of a catalog search, replaced wholesale on every successful search
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchResultItem {
    pub catalog_id: String,
    pub title: String,
    pub year: String,
    pub poster_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>, // "movie", "series", "episode"
}

impl SearchResultItem {
    pub fn poster_or_placeholder(&self) -> &str {
        self.poster_url.as_deref().unwrap_or(crate::POSTER_PLACEHOLDER)
    }
}
