use popcorn_models::SearchResultItem;
use popcorn_sources::{CatalogError, CatalogSource};
use std::sync::Arc;
use tracing::{debug, warn};
use crate::event::{CoreEvent, EventSender};
use crate::request::{InFlight, RequestId, RequestIds};

/// What `submit` did with a query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchStart {
    /// Under the floor: results and error cleared, nothing sent
    BelowFloor,
    /// Same query as the active one; nothing to do
    Unchanged,
    Started(RequestId),
}

/// What `settle` did with a finished request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchApplied {
    /// Results replaced; any open detail view should close
    Results { count: usize },
    Failed { message: String },
    /// The request reported itself superseded; no state changed beyond loading
    Cancelled,
    /// Not the current request; ignored
    Stale,
}

/// Cancellable catalog search driven by the debounced query.
///
/// At most one request is in flight. Submitting a new query aborts the
/// previous task before the new one starts, and a response tagged with any
/// id but the current one is dropped, so a superseded search can never
/// overwrite newer results.
pub struct SearchController {
    source: Arc<dyn CatalogSource>,
    events: EventSender,
    min_query_len: usize,
    results: Vec<SearchResultItem>,
    is_loading: bool,
    error: Option<String>,
    active_query: Option<String>,
    ids: RequestIds,
    in_flight: Option<InFlight>,
}

impl SearchController {
    pub fn new(source: Arc<dyn CatalogSource>, events: EventSender, min_query_len: usize) -> Self {
        Self {
            source,
            events,
            min_query_len,
            results: Vec::new(),
            is_loading: false,
            error: None,
            active_query: None,
            ids: RequestIds::default(),
            in_flight: None,
        }
    }

    pub fn results(&self) -> &[SearchResultItem] {
        &self.results
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Query the current results (or in-flight request) belong to
    pub fn active_query(&self) -> Option<&str> {
        self.active_query.as_deref()
    }

    pub fn in_flight(&self) -> Option<RequestId> {
        self.in_flight.as_ref().map(InFlight::id)
    }

    pub fn min_query_len(&self) -> usize {
        self.min_query_len
    }

    pub fn is_below_floor(&self, query: &str) -> bool {
        query.trim().chars().count() < self.min_query_len
    }

    /// Abort any request and empty the result list
    pub fn clear(&mut self) {
        if let Some(in_flight) = self.in_flight.take() {
            debug!(request = in_flight.id().value(), "Cancelling search below query floor");
        }
        self.results.clear();
        self.error = None;
        self.is_loading = false;
        self.active_query = None;
    }

    pub fn submit(&mut self, query: &str) -> SearchStart {
        let query = query.trim();
        if self.is_below_floor(query) {
            self.clear();
            return SearchStart::BelowFloor;
        }
        if self.active_query.as_deref() == Some(query) {
            return SearchStart::Unchanged;
        }

        if let Some(previous) = self.in_flight.take() {
            debug!(request = previous.id().value(), "Cancelling superseded search");
        }

        self.error = None;
        self.is_loading = true;
        self.active_query = Some(query.to_string());

        let id = self.ids.next_id();
        let source = Arc::clone(&self.source);
        let events = self.events.clone();
        let query = query.to_string();
        debug!(request = id.value(), query = %query, "Starting search");

        self.in_flight = Some(InFlight::spawn(id, async move {
            let outcome = source.search(&query).await;
            // Receiver gone means the app is shutting down
            let _ = events.send(CoreEvent::SearchSettled { id, query, outcome });
        }));

        SearchStart::Started(id)
    }

    pub fn settle(&mut self, id: RequestId, outcome: Result<Vec<SearchResultItem>, CatalogError>) -> SearchApplied {
        if self.in_flight() != Some(id) {
            debug!(request = id.value(), "Ignoring stale search response");
            return SearchApplied::Stale;
        }
        self.in_flight = None;
        self.is_loading = false;

        match outcome {
            Ok(items) => {
                let count = items.len();
                self.results = items;
                self.error = None;
                SearchApplied::Results { count }
            }
            Err(err) if err.is_cancelled() => {
                debug!(request = id.value(), "Search cancelled");
                SearchApplied::Cancelled
            }
            Err(err) => {
                warn!(request = id.value(), error = %err, "Search failed");
                let message = err.user_message().to_string();
                self.results.clear();
                self.error = Some(message.clone());
                // Let the same text retry the next time it settles
                self.active_query = None;
                SearchApplied::Failed { message }
            }
        }
    }
}
