use crate::error::CatalogError;
use crate::omdb::api;
use crate::traits::CatalogSource;
use async_trait::async_trait;
use popcorn_config::CatalogConfig;
use popcorn_models::{MovieDetail, SearchResultItem};
use reqwest::Client;
use std::sync::Arc;

/// Create a reqwest Client identifying the app
pub fn create_omdb_client() -> Client {
    Client::builder()
        .user_agent(concat!("popcorn/", env!("CARGO_PKG_VERSION")))
        .build()
        .unwrap_or_else(|_| Client::new())
}

#[derive(Clone)]
pub struct OmdbClient {
    client: Arc<Client>,
    api_key: String,
    base_url: String,
}

impl OmdbClient {
    pub fn new(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            client: Arc::new(create_omdb_client()),
            api_key: api_key.into(),
            base_url: base_url.into(),
        }
    }

    pub fn from_config(config: &CatalogConfig) -> Self {
        Self::new(config.api_key.clone(), config.base_url.clone())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl CatalogSource for OmdbClient {
    fn source_name(&self) -> &str {
        "omdb"
    }

    async fn search(&self, query: &str) -> Result<Vec<SearchResultItem>, CatalogError> {
        api::search(&self.client, &self.base_url, &self.api_key, query).await
    }

    async fn movie_detail(&self, catalog_id: &str) -> Result<MovieDetail, CatalogError> {
        api::get_detail(&self.client, &self.base_url, &self.api_key, catalog_id).await
    }
}
