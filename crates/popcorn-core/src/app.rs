use popcorn_config::SearchOptions;
use popcorn_models::WatchedEntry;
use popcorn_sources::CatalogSource;
use std::sync::Arc;
use std::time::Instant;
use tracing::debug;
use crate::debounce::Debouncer;
use crate::detail::{DetailApplied, DetailController, Selection};
use crate::event::{CoreEvent, EventSender};
use crate::search::{SearchApplied, SearchController, SearchStart};
use crate::store::WatchedStore;
use crate::title::{movie_title, TitleSurface, DEFAULT_TITLE};
use crate::view::{self, AppView, Pane, PaneState, ViewInput};
use crate::watched::{WatchedError, WatchedListModel};

/// The Escape-key registration held while a detail view is open
#[derive(Debug, Clone, PartialEq, Eq)]
struct DismissListener {
    catalog_id: String,
}

/// Top-level controller: owns every piece of state and routes user input and
/// settled requests to the component that governs it.
///
/// Each transition method leaves the app consistent; call [`App::view`]
/// afterwards to get the new view model.
pub struct App<S: WatchedStore, T: TitleSurface> {
    query: String,
    debouncer: Debouncer<String>,
    search: SearchController,
    detail: DetailController,
    watched: WatchedListModel<S>,
    title: T,
    dismiss_listener: Option<DismissListener>,
    panes: PaneState,
    cursor: usize,
    watched_cursor: usize,
}

impl<S: WatchedStore, T: TitleSurface> App<S, T> {
    pub fn new(
        source: Arc<dyn CatalogSource>,
        store: S,
        mut title: T,
        options: &SearchOptions,
        events: EventSender,
    ) -> Self {
        title.set_title(DEFAULT_TITLE);
        Self {
            query: String::new(),
            debouncer: Debouncer::new(String::new(), options.debounce()),
            search: SearchController::new(Arc::clone(&source), events.clone(), options.min_query_len),
            detail: DetailController::new(source, events),
            watched: WatchedListModel::load(store),
            title,
            dismiss_listener: None,
            panes: PaneState::default(),
            cursor: 0,
            watched_cursor: 0,
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn search(&self) -> &SearchController {
        &self.search
    }

    pub fn detail(&self) -> &DetailController {
        &self.detail
    }

    pub fn watched(&self) -> &WatchedListModel<S> {
        &self.watched
    }

    pub fn title(&self) -> &T {
        &self.title
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Highlighted row of the watched list
    pub fn watched_cursor(&self) -> usize {
        self.watched_cursor
    }

    pub fn panes(&self) -> PaneState {
        self.panes
    }

    pub fn dismiss_listener_installed(&self) -> bool {
        self.dismiss_listener.is_some()
    }

    /// When the debouncer next needs a `tick`
    pub fn next_deadline(&self) -> Option<Instant> {
        self.debouncer.deadline()
    }

    /// Keystroke in the search box.
    ///
    /// A raw query under the floor clears results immediately, so it wins
    /// over any pending or in-flight search for a longer query.
    pub fn set_query(&mut self, query: impl Into<String>, now: Instant) {
        self.query = query.into();
        let trimmed = self.query.trim().to_string();
        if self.search.is_below_floor(&trimmed) {
            self.search.clear();
            self.cursor = 0;
        }
        self.debouncer.push(trimmed, now);
    }

    pub fn push_char(&mut self, c: char, now: Instant) {
        let mut query = self.query.clone();
        query.push(c);
        self.set_query(query, now);
    }

    pub fn pop_char(&mut self, now: Instant) {
        let mut query = self.query.clone();
        query.pop();
        self.set_query(query, now);
    }

    /// Advance the debounce timer; returns whether a search was started or cleared
    pub fn tick(&mut self, now: Instant) -> bool {
        let Some(debounced) = self.debouncer.poll(now) else {
            return false;
        };
        match self.search.submit(&debounced) {
            SearchStart::Started(_) => {
                self.cursor = 0;
                true
            }
            SearchStart::BelowFloor => true,
            SearchStart::Unchanged => false,
        }
    }

    pub fn handle_event(&mut self, event: CoreEvent) {
        match event {
            CoreEvent::SearchSettled { id, query, outcome } => {
                debug!(request = id.value(), query = %query, "Search settled");
                if let SearchApplied::Results { .. } = self.search.settle(id, outcome) {
                    self.cursor = 0;
                    // A new result set invalidates the previous selection
                    self.close_detail();
                }
            }
            CoreEvent::DetailSettled { id, catalog_id, outcome } => {
                debug!(request = id.value(), catalog_id = %catalog_id, "Detail settled");
                if let DetailApplied::Loaded { title } = self.detail.settle(id, outcome) {
                    if !title.is_empty() {
                        self.title.set_title(&movie_title(&title));
                    }
                }
            }
        }
    }

    /// Open a movie, or close it when it is already open
    pub fn select(&mut self, catalog_id: &str) {
        let was_open = self.detail.is_open();
        let existing = self.watched.user_rating_for(catalog_id);
        match self.detail.select(catalog_id, existing) {
            Selection::Opened { catalog_id, .. } => {
                if was_open {
                    self.title.set_title(DEFAULT_TITLE);
                }
                self.dismiss_listener = Some(DismissListener { catalog_id });
            }
            Selection::Closed => self.teardown_detail(),
        }
    }

    pub fn select_highlighted(&mut self) {
        let Some(item) = self.search.results().get(self.cursor) else {
            return;
        };
        let catalog_id = item.catalog_id.clone();
        self.select(&catalog_id);
    }

    pub fn move_cursor(&mut self, delta: isize) {
        let len = self.search.results().len();
        if len == 0 {
            self.cursor = 0;
            return;
        }
        let next = self.cursor as isize + delta;
        self.cursor = next.clamp(0, len as isize - 1) as usize;
    }

    pub fn close_detail(&mut self) {
        if self.detail.close() {
            self.teardown_detail();
        }
    }

    /// Escape; only acts while the dismiss listener is installed
    pub fn handle_dismiss_key(&mut self) -> bool {
        if self.dismiss_listener.is_none() {
            return false;
        }
        self.close_detail();
        true
    }

    pub fn set_user_rating(&mut self, rating: u8) {
        self.detail.set_user_rating(rating);
    }

    /// Confirm the open movie onto the watched list and close it.
    ///
    /// Returns `Ok(false)` when there is nothing to confirm: no loaded detail,
    /// no rating yet, or the movie is already watched.
    pub fn add_selected_to_watched(&mut self) -> Result<bool, WatchedError> {
        let Some(detail) = self.detail.detail() else {
            return Ok(false);
        };
        let rating = self.detail.user_rating();
        if rating == 0 || self.watched.contains(&detail.catalog_id) {
            return Ok(false);
        }
        let entry = WatchedEntry::from_detail(detail, rating);
        self.watched.add(entry)?;
        self.close_detail();
        Ok(true)
    }

    pub fn remove_watched(&mut self, catalog_id: &str) -> usize {
        let removed = self.watched.remove(catalog_id);
        if self.detail.selected() == Some(catalog_id) {
            self.detail.sync_user_rating(self.watched.user_rating_for(catalog_id));
        }
        self.watched_cursor = self.watched_cursor.min(self.watched.len().saturating_sub(1));
        removed
    }

    pub fn move_watched_cursor(&mut self, delta: isize) {
        let len = self.watched.len();
        if len == 0 {
            self.watched_cursor = 0;
            return;
        }
        let next = self.watched_cursor as isize + delta;
        self.watched_cursor = next.clamp(0, len as isize - 1) as usize;
    }

    /// The row's delete button
    pub fn remove_highlighted_watched(&mut self) -> usize {
        match self.watched.entries().get(self.watched_cursor) {
            Some(entry) => {
                let catalog_id = entry.catalog_id.clone();
                self.remove_watched(&catalog_id)
            }
            None => 0,
        }
    }

    /// Open the highlighted watched movie
    pub fn select_highlighted_watched(&mut self) {
        let Some(entry) = self.watched.entries().get(self.watched_cursor) else {
            return;
        };
        let catalog_id = entry.catalog_id.clone();
        self.select(&catalog_id);
    }

    /// Remove the open movie from the watched list
    pub fn remove_selected_from_watched(&mut self) -> usize {
        match self.detail.selected().map(str::to_string) {
            Some(catalog_id) => self.remove_watched(&catalog_id),
            None => 0,
        }
    }

    pub fn toggle_pane(&mut self, pane: Pane) {
        self.panes.toggle(pane);
    }

    pub fn view(&self) -> AppView {
        view::project(&ViewInput {
            query: &self.query,
            results: self.search.results(),
            search_loading: self.search.is_loading(),
            search_error: self.search.error(),
            cursor: self.cursor,
            selected: self.detail.selected(),
            detail: self.detail.detail(),
            detail_loading: self.detail.is_loading(),
            detail_error: self.detail.error(),
            user_rating: self.detail.user_rating(),
            watched: self.watched.entries(),
            watched_cursor: self.watched_cursor,
            summary: self.watched.summary(),
            panes: self.panes,
        })
    }

    fn teardown_detail(&mut self) {
        if let Some(listener) = self.dismiss_listener.take() {
            debug!(catalog_id = %listener.catalog_id, "Removed dismiss listener");
        }
        self.title.set_title(DEFAULT_TITLE);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{self, EventReceiver};
    use crate::store::MemoryStore;
    use crate::testing::{movie_detail, result_item, settle_tasks, RecordedTitle, Script, ScriptedCatalog};
    use crate::view::{DetailBody, ResultsBody, SideBody};
    use popcorn_sources::CatalogError;
    use std::time::Duration;

    type TestApp = App<MemoryStore, RecordedTitle>;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn new_app(catalog: Arc<ScriptedCatalog>, store: MemoryStore) -> (TestApp, EventReceiver) {
        let (tx, rx) = event::channel();
        let app = App::new(catalog, store, RecordedTitle::default(), &SearchOptions::default(), tx);
        (app, rx)
    }

    async fn pump(app: &mut TestApp, rx: &mut EventReceiver) {
        let event = rx.recv().await.unwrap();
        app.handle_event(event);
    }

    fn batman_catalog() -> ScriptedCatalog {
        ScriptedCatalog::new()
            .on_search(
                "batman",
                Script::Ready(Ok(vec![result_item("tt0372784", "Batman Begins"), result_item("tt0468569", "The Dark Knight")])),
            )
            .on_detail(
                "tt0372784",
                Script::Ready(Ok(movie_detail("tt0372784", "Batman Begins", Some(140), Some(8.2)))),
            )
    }

    #[tokio::test]
    async fn test_typing_searches_once_after_debounce() {
        let catalog = Arc::new(batman_catalog());
        let (mut app, mut rx) = new_app(catalog.clone(), MemoryStore::new());
        let t0 = Instant::now();

        for (i, c) in "batman".chars().enumerate() {
            let at = t0 + ms(50 * i as u64);
            app.push_char(c, at);
            assert!(!app.tick(at));
        }
        settle_tasks().await;
        assert!(catalog.calls().is_empty());

        assert!(app.tick(t0 + ms(250 + 500)));
        pump(&mut app, &mut rx).await;

        assert_eq!(catalog.calls(), vec!["search:batman".to_string()]);
        assert_eq!(app.view().nav.result_count, 2);
    }

    #[tokio::test]
    async fn test_short_query_wins_over_previous_results() {
        let catalog = Arc::new(batman_catalog());
        let (mut app, mut rx) = new_app(catalog.clone(), MemoryStore::new());
        let t0 = Instant::now();

        app.set_query("batman", t0);
        app.tick(t0 + ms(500));
        pump(&mut app, &mut rx).await;
        assert_eq!(app.search().results().len(), 2);

        app.set_query("b", t0 + ms(600));
        assert!(app.search().results().is_empty());
        app.tick(t0 + ms(1100));
        settle_tasks().await;

        assert!(app.search().results().is_empty());
        assert_eq!(catalog.calls().len(), 1);
        assert_eq!(app.view().results.body, Some(ResultsBody::List(vec![])));
    }

    #[tokio::test]
    async fn test_short_query_cancels_in_flight_search() {
        let catalog = Arc::new(ScriptedCatalog::new().on_search("batman", Script::Hang));
        let (mut app, _rx) = new_app(catalog.clone(), MemoryStore::new());
        let t0 = Instant::now();

        app.set_query("batman", t0);
        app.tick(t0 + ms(500));
        settle_tasks().await;
        assert!(app.search().is_loading());

        app.set_query("b", t0 + ms(600));
        settle_tasks().await;
        assert!(!app.search().is_loading());
        assert_eq!(catalog.aborted(), vec!["search:batman".to_string()]);
    }

    #[tokio::test]
    async fn test_returning_to_same_query_searches_again() {
        let catalog = Arc::new(batman_catalog());
        let (mut app, mut rx) = new_app(catalog.clone(), MemoryStore::new());
        let t0 = Instant::now();

        app.set_query("batman", t0);
        app.tick(t0 + ms(500));
        pump(&mut app, &mut rx).await;

        app.set_query("b", t0 + ms(600));
        app.set_query("batman", t0 + ms(700));
        assert!(app.tick(t0 + ms(1200)));
        pump(&mut app, &mut rx).await;

        assert_eq!(catalog.calls().len(), 2);
        assert_eq!(app.search().results().len(), 2);
    }

    #[tokio::test]
    async fn test_select_sets_title_and_dismiss_tears_down() {
        let catalog = Arc::new(batman_catalog());
        let (mut app, mut rx) = new_app(catalog, MemoryStore::new());

        app.select("tt0372784");
        assert!(app.dismiss_listener_installed());
        pump(&mut app, &mut rx).await;
        assert_eq!(app.title().current(), Some("Movie | Batman Begins"));

        assert!(app.handle_dismiss_key());
        assert!(!app.detail().is_open());
        assert!(app.detail().detail().is_none());
        assert!(!app.dismiss_listener_installed());
        assert_eq!(app.title().current(), Some("usePopcorn"));
        assert!(matches!(app.view().side.body, Some(SideBody::Watched(_))));

        // Nothing to dismiss any more
        assert!(!app.handle_dismiss_key());
    }

    #[tokio::test]
    async fn test_rate_and_add_closes_detail() {
        let catalog = Arc::new(batman_catalog());
        let (mut app, mut rx) = new_app(catalog, MemoryStore::new());

        app.select("tt0372784");
        pump(&mut app, &mut rx).await;
        assert_eq!(app.add_selected_to_watched(), Ok(false), "no rating yet");

        app.set_user_rating(9);
        assert_eq!(app.add_selected_to_watched(), Ok(true));
        assert!(!app.detail().is_open());
        assert_eq!(app.watched().len(), 1);
        assert_eq!(app.watched().store().writes(), 1);

        let entry = &app.watched().entries()[0];
        assert_eq!(entry.user_rating, 9);
        assert_eq!(entry.runtime_minutes, Some(140));
    }

    #[tokio::test]
    async fn test_reopening_watched_movie_seeds_rating() {
        let catalog = Arc::new(batman_catalog());
        let detail = movie_detail("tt0372784", "Batman Begins", Some(140), Some(8.2));
        let store = MemoryStore::with_entries(vec![WatchedEntry::from_detail(&detail, 7)]);
        let (mut app, mut rx) = new_app(catalog, store);

        app.select("tt0372784");
        pump(&mut app, &mut rx).await;
        assert_eq!(app.detail().user_rating(), 7);
        assert_eq!(app.add_selected_to_watched(), Ok(false));

        assert_eq!(app.remove_selected_from_watched(), 1);
        assert_eq!(app.detail().user_rating(), 0);
        assert!(app.detail().is_open());
    }

    #[tokio::test]
    async fn test_successful_search_closes_detail() {
        let catalog = Arc::new(batman_catalog());
        let (mut app, mut rx) = new_app(catalog, MemoryStore::new());
        let t0 = Instant::now();

        app.select("tt0372784");
        pump(&mut app, &mut rx).await;
        assert!(app.detail().is_open());

        app.set_query("batman", t0);
        app.tick(t0 + ms(500));
        pump(&mut app, &mut rx).await;

        assert!(!app.detail().is_open());
        assert!(!app.dismiss_listener_installed());
        assert_eq!(app.title().current(), Some("usePopcorn"));
    }

    #[tokio::test]
    async fn test_detail_error_does_not_touch_search() {
        let catalog = Arc::new(
            batman_catalog().on_detail("tt0468569", Script::Ready(Err(CatalogError::Status(500)))),
        );
        let (mut app, mut rx) = new_app(catalog, MemoryStore::new());
        let t0 = Instant::now();

        app.set_query("batman", t0);
        app.tick(t0 + ms(500));
        pump(&mut app, &mut rx).await;

        app.move_cursor(1);
        app.select_highlighted();
        pump(&mut app, &mut rx).await;

        assert_eq!(
            app.view().side.body,
            Some(SideBody::Detail(DetailBody::Error("Something went wrong with fetching movies".to_string())))
        );
        assert!(app.search().error().is_none());
        assert_eq!(app.search().results().len(), 2);
    }

    #[tokio::test]
    async fn test_cursor_is_clamped() {
        let catalog = Arc::new(batman_catalog());
        let (mut app, mut rx) = new_app(catalog, MemoryStore::new());
        let t0 = Instant::now();

        app.move_cursor(3);
        assert_eq!(app.cursor(), 0);

        app.set_query("batman", t0);
        app.tick(t0 + ms(500));
        pump(&mut app, &mut rx).await;
        app.move_cursor(5);
        assert_eq!(app.cursor(), 1);
        app.move_cursor(-9);
        assert_eq!(app.cursor(), 0);
    }

    #[test]
    fn test_watched_row_delete_removes_highlighted_entry() {
        let store = MemoryStore::with_entries(vec![
            WatchedEntry::from_detail(&movie_detail("tt1", "Batman Begins", Some(140), Some(8.2)), 8),
            WatchedEntry::from_detail(&movie_detail("tt2", "The Dark Knight", Some(152), Some(9.0)), 10),
        ]);
        let (mut app, _rx) = new_app(Arc::new(ScriptedCatalog::new()), store);

        app.move_watched_cursor(5);
        assert_eq!(app.watched_cursor(), 1);
        assert_eq!(app.remove_highlighted_watched(), 1);
        assert!(!app.watched().contains("tt2"));
        assert_eq!(app.watched_cursor(), 0);
        assert_eq!(app.watched().store().writes(), 1);

        assert_eq!(app.remove_highlighted_watched(), 1);
        assert!(app.watched().is_empty());
        assert_eq!(app.remove_highlighted_watched(), 0);
        assert_eq!(app.watched().store().writes(), 2);
    }
}
