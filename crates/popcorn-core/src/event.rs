use popcorn_models::{MovieDetail, SearchResultItem};
use popcorn_sources::CatalogError;
use crate::request::RequestId;

/// Completion of a background request, delivered back to the owning controller
#[derive(Debug)]
pub enum CoreEvent {
    SearchSettled {
        id: RequestId,
        query: String,
        outcome: Result<Vec<SearchResultItem>, CatalogError>,
    },
    DetailSettled {
        id: RequestId,
        catalog_id: String,
        outcome: Result<MovieDetail, CatalogError>,
    },
}

pub type EventSender = tokio::sync::mpsc::UnboundedSender<CoreEvent>;
pub type EventReceiver = tokio::sync::mpsc::UnboundedReceiver<CoreEvent>;

pub fn channel() -> (EventSender, EventReceiver) {
    tokio::sync::mpsc::unbounded_channel()
}
