use popcorn_models::MovieDetail;
use popcorn_sources::{CatalogError, CatalogSource};
use std::sync::Arc;
use tracing::{debug, warn};
use crate::event::{CoreEvent, EventSender};
use crate::request::{InFlight, RequestId, RequestIds};

pub const MAX_USER_RATING: u8 = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    Opened { catalog_id: String, request: RequestId },
    /// The open movie was selected again and closed
    Closed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailApplied {
    Loaded { title: String },
    Failed { message: String },
    Cancelled,
    Stale,
}

/// Detail lookup for the selected movie.
///
/// Loading is cleared whenever a request settles, so a failed lookup shows
/// its error without a loader next to it.
pub struct DetailController {
    source: Arc<dyn CatalogSource>,
    events: EventSender,
    selected: Option<String>,
    detail: Option<MovieDetail>,
    is_loading: bool,
    error: Option<String>,
    user_rating: u8,
    ids: RequestIds,
    in_flight: Option<InFlight>,
}

impl DetailController {
    pub fn new(source: Arc<dyn CatalogSource>, events: EventSender) -> Self {
        Self {
            source,
            events,
            selected: None,
            detail: None,
            is_loading: false,
            error: None,
            user_rating: 0,
            ids: RequestIds::default(),
            in_flight: None,
        }
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn is_open(&self) -> bool {
        self.selected.is_some()
    }

    pub fn detail(&self) -> Option<&MovieDetail> {
        self.detail.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn user_rating(&self) -> u8 {
        self.user_rating
    }

    pub fn in_flight(&self) -> Option<RequestId> {
        self.in_flight.as_ref().map(InFlight::id)
    }

    /// Open `catalog_id`, or close it when it is already the open movie.
    ///
    /// `existing_rating` seeds the user rating from the watched list.
    pub fn select(&mut self, catalog_id: &str, existing_rating: Option<u8>) -> Selection {
        if self.selected.as_deref() == Some(catalog_id) {
            self.close();
            return Selection::Closed;
        }

        self.close();
        self.selected = Some(catalog_id.to_string());
        self.is_loading = true;
        self.user_rating = existing_rating.unwrap_or(0).min(MAX_USER_RATING);

        let id = self.ids.next_id();
        let source = Arc::clone(&self.source);
        let events = self.events.clone();
        let requested = catalog_id.to_string();
        debug!(request = id.value(), catalog_id, "Loading movie detail");

        self.in_flight = Some(InFlight::spawn(id, async move {
            let outcome = source.movie_detail(&requested).await;
            let _ = events.send(CoreEvent::DetailSettled {
                id,
                catalog_id: requested,
                outcome,
            });
        }));

        Selection::Opened {
            catalog_id: catalog_id.to_string(),
            request: id,
        }
    }

    /// Tear down the detail view; returns whether one was open
    pub fn close(&mut self) -> bool {
        let was_open = self.selected.take().is_some();
        if let Some(in_flight) = self.in_flight.take() {
            debug!(request = in_flight.id().value(), "Cancelling detail request");
        }
        self.detail = None;
        self.is_loading = false;
        self.error = None;
        self.user_rating = 0;
        was_open
    }

    pub fn settle(&mut self, id: RequestId, outcome: Result<MovieDetail, CatalogError>) -> DetailApplied {
        if self.in_flight() != Some(id) {
            debug!(request = id.value(), "Ignoring stale detail response");
            return DetailApplied::Stale;
        }
        self.in_flight = None;
        self.is_loading = false;

        match outcome {
            Ok(detail) => {
                let title = detail.title.clone();
                self.detail = Some(detail);
                self.error = None;
                DetailApplied::Loaded { title }
            }
            Err(err) if err.is_cancelled() => DetailApplied::Cancelled,
            Err(err) => {
                warn!(request = id.value(), error = %err, "Detail lookup failed");
                let message = err.user_message().to_string();
                self.error = Some(message.clone());
                DetailApplied::Failed { message }
            }
        }
    }

    /// Star input callback; ignored while nothing is open
    pub fn set_user_rating(&mut self, rating: u8) {
        if self.is_open() {
            self.user_rating = rating.min(MAX_USER_RATING);
        }
    }

    /// Re-seed the rating after the watched list changed under the open movie
    pub fn sync_user_rating(&mut self, existing_rating: Option<u8>) {
        if self.is_open() {
            self.user_rating = existing_rating.unwrap_or(0).min(MAX_USER_RATING);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{self, CoreEvent, EventReceiver};
    use crate::testing::{movie_detail, settle_tasks, Script, ScriptedCatalog};

    async fn next_settled(rx: &mut EventReceiver) -> (RequestId, Result<MovieDetail, CatalogError>) {
        match rx.recv().await.unwrap() {
            CoreEvent::DetailSettled { id, outcome, .. } => (id, outcome),
            other => panic!("unexpected event {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_select_loads_detail() {
        let catalog = Arc::new(
            ScriptedCatalog::new().on_detail("tt1", Script::Ready(Ok(movie_detail("tt1", "Batman Begins", Some(140), Some(8.2))))),
        );
        let (tx, mut rx) = event::channel();
        let mut detail = DetailController::new(catalog, tx);

        let selection = detail.select("tt1", None);
        assert!(matches!(selection, Selection::Opened { .. }));
        assert!(detail.is_loading());
        assert_eq!(detail.user_rating(), 0);

        let (id, outcome) = next_settled(&mut rx).await;
        assert_eq!(
            detail.settle(id, outcome),
            DetailApplied::Loaded { title: "Batman Begins".to_string() }
        );
        assert!(!detail.is_loading());
        assert_eq!(detail.detail().unwrap().runtime_minutes, Some(140));
    }

    #[tokio::test]
    async fn test_failure_clears_loading() {
        let catalog = Arc::new(ScriptedCatalog::new().on_detail("tt404", Script::Ready(Err(CatalogError::Status(502)))));
        let (tx, mut rx) = event::channel();
        let mut detail = DetailController::new(catalog, tx);

        detail.select("tt404", None);
        let (id, outcome) = next_settled(&mut rx).await;
        detail.settle(id, outcome);

        assert!(!detail.is_loading());
        assert_eq!(detail.error(), Some("Something went wrong with fetching movies"));
        assert!(detail.detail().is_none());
    }

    #[tokio::test]
    async fn test_selecting_open_movie_toggles_off() {
        let catalog = Arc::new(ScriptedCatalog::new().on_detail("tt1", Script::Hang));
        let (tx, _rx) = event::channel();
        let mut detail = DetailController::new(catalog.clone(), tx);

        detail.select("tt1", Some(7));
        assert_eq!(detail.user_rating(), 7);
        settle_tasks().await;
        assert_eq!(detail.select("tt1", Some(7)), Selection::Closed);
        settle_tasks().await;

        assert!(!detail.is_open());
        assert_eq!(detail.user_rating(), 0);
        assert_eq!(catalog.aborted(), vec!["detail:tt1".to_string()]);
    }

    #[tokio::test]
    async fn test_switching_selection_ignores_previous_response() {
        let catalog = Arc::new(
            ScriptedCatalog::new()
                .on_detail("tt1", Script::Hang)
                .on_detail("tt2", Script::Ready(Ok(movie_detail("tt2", "The Dark Knight", Some(152), Some(9.0))))),
        );
        let (tx, mut rx) = event::channel();
        let mut detail = DetailController::new(catalog.clone(), tx);

        let Selection::Opened { request: first, .. } = detail.select("tt1", None) else { panic!() };
        settle_tasks().await;
        detail.select("tt2", None);

        assert_eq!(
            detail.settle(first, Ok(movie_detail("tt1", "Batman Begins", None, None))),
            DetailApplied::Stale
        );
        let (id, outcome) = next_settled(&mut rx).await;
        detail.settle(id, outcome);
        assert_eq!(detail.detail().unwrap().title, "The Dark Knight");
        settle_tasks().await;
        assert_eq!(catalog.aborted(), vec!["detail:tt1".to_string()]);
    }

    #[tokio::test]
    async fn test_rating_only_settable_while_open() {
        let catalog = Arc::new(ScriptedCatalog::new().on_detail("tt1", Script::Hang));
        let (tx, _rx) = event::channel();
        let mut detail = DetailController::new(catalog, tx);

        detail.set_user_rating(5);
        assert_eq!(detail.user_rating(), 0);

        detail.select("tt1", None);
        detail.set_user_rating(12);
        assert_eq!(detail.user_rating(), 10);
        detail.sync_user_rating(None);
        assert_eq!(detail.user_rating(), 0);
    }
}
