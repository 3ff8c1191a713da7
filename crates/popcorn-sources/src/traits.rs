use async_trait::async_trait;
use popcorn_models::{MovieDetail, SearchResultItem};
use crate::error::CatalogError;

/// A movie catalog the app can search and look up detail in.
///
/// Implementations must be cancel-safe: callers abort superseded requests by
/// dropping the future, which has to release the underlying connection.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    fn source_name(&self) -> &str;

    /// Free-text search; an empty match set is reported as `NotFound`
    async fn search(&self, query: &str) -> Result<Vec<SearchResultItem>, CatalogError>;

    /// Full record for a single catalog id
    async fn movie_detail(&self, catalog_id: &str) -> Result<MovieDetail, CatalogError>;
}
