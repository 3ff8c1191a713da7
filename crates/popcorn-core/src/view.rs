//! View model computed from app state.
//!
//! [`project`] is a pure function: the UI calls it after every state
//! transition and renders whatever it returns. Nothing here mutates state or
//! knows how it will be drawn.

use popcorn_models::{MovieDetail, SearchResultItem, WatchedEntry};
use crate::detail::MAX_USER_RATING;
use crate::watched::{convert_decimal, runtime_postfix, WatchedSummary};

pub const APP_NAME: &str = "usePopcorn";
pub const SEARCH_PLACEHOLDER: &str = "Search movies...";
pub const LOADING_MESSAGE: &str = "Loading, please wait...";

/// Which collapsible box a toggle applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pane {
    Results,
    Side,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaneState {
    pub results_open: bool,
    pub side_open: bool,
}

impl Default for PaneState {
    fn default() -> Self {
        Self {
            results_open: true,
            side_open: true,
        }
    }
}

impl PaneState {
    pub fn toggle(&mut self, pane: Pane) {
        match pane {
            Pane::Results => self.results_open = !self.results_open,
            Pane::Side => self.side_open = !self.side_open,
        }
    }
}

/// Everything the projection reads
pub struct ViewInput<'a> {
    pub query: &'a str,
    pub results: &'a [SearchResultItem],
    pub search_loading: bool,
    pub search_error: Option<&'a str>,
    pub cursor: usize,
    pub selected: Option<&'a str>,
    pub detail: Option<&'a MovieDetail>,
    pub detail_loading: bool,
    pub detail_error: Option<&'a str>,
    pub user_rating: u8,
    pub watched: &'a [WatchedEntry],
    pub watched_cursor: usize,
    pub summary: WatchedSummary,
    pub panes: PaneState,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppView {
    pub nav: NavBarView,
    pub results: PaneView<ResultsBody>,
    pub side: PaneView<SideBody>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NavBarView {
    pub logo: &'static str,
    pub query: String,
    pub placeholder: &'static str,
    pub result_count: usize,
}

/// A collapsible box; `body` is `None` while collapsed
#[derive(Debug, Clone, PartialEq)]
pub struct PaneView<T> {
    pub open: bool,
    pub body: Option<T>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ResultsBody {
    Loading,
    Error(String),
    List(Vec<ResultRow>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResultRow {
    pub catalog_id: String,
    pub title: String,
    pub year: String,
    pub poster: String,
    pub highlighted: bool,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SideBody {
    Detail(DetailBody),
    Watched(WatchedView),
}

#[derive(Debug, Clone, PartialEq)]
pub enum DetailBody {
    Loading,
    Error(String),
    Loaded(DetailView),
}

#[derive(Debug, Clone, PartialEq)]
pub struct DetailView {
    pub catalog_id: String,
    pub title: String,
    pub poster: String,
    pub released: String,
    pub runtime: String,
    pub genre: String,
    pub imdb_rating: String,
    pub plot: String,
    pub actors: String,
    pub director: String,
    pub user_rating: u8,
    pub max_rating: u8,
    pub is_watched: bool,
    /// Offered only once the user picked a rating
    pub action: Option<DetailAction>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailAction {
    Add,
    Remove,
}

impl DetailAction {
    pub fn label(&self) -> &'static str {
        match self {
            DetailAction::Add => "+ Add to list",
            DetailAction::Remove => "⛔ Remove from the list",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WatchedView {
    pub summary: SummaryView,
    pub rows: Vec<WatchedRow>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SummaryView {
    pub heading: &'static str,
    pub count: String,
    pub avg_imdb_rating: String,
    pub avg_user_rating: String,
    pub total_runtime: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WatchedRow {
    pub catalog_id: String,
    pub title: String,
    pub poster: String,
    pub imdb_rating: String,
    pub user_rating: u8,
    pub runtime: String,
    pub highlighted: bool,
}

pub fn project(input: &ViewInput<'_>) -> AppView {
    AppView {
        nav: NavBarView {
            logo: APP_NAME,
            query: input.query.to_string(),
            placeholder: SEARCH_PLACEHOLDER,
            result_count: input.results.len(),
        },
        results: PaneView {
            open: input.panes.results_open,
            body: input.panes.results_open.then(|| results_body(input)),
        },
        side: PaneView {
            open: input.panes.side_open,
            body: input.panes.side_open.then(|| side_body(input)),
        },
    }
}

fn results_body(input: &ViewInput<'_>) -> ResultsBody {
    if input.search_loading {
        return ResultsBody::Loading;
    }
    if let Some(error) = input.search_error {
        return ResultsBody::Error(error.to_string());
    }
    ResultsBody::List(
        input
            .results
            .iter()
            .enumerate()
            .map(|(i, item)| ResultRow {
                catalog_id: item.catalog_id.clone(),
                title: item.title.clone(),
                year: item.year.clone(),
                poster: item.poster_or_placeholder().to_string(),
                highlighted: i == input.cursor,
                selected: input.selected == Some(item.catalog_id.as_str()),
            })
            .collect(),
    )
}

fn side_body(input: &ViewInput<'_>) -> SideBody {
    match input.selected {
        Some(selected) => SideBody::Detail(detail_body(input, selected)),
        None => SideBody::Watched(watched_view(input)),
    }
}

fn detail_body(input: &ViewInput<'_>, selected: &str) -> DetailBody {
    if input.detail_loading {
        return DetailBody::Loading;
    }
    if let Some(error) = input.detail_error {
        return DetailBody::Error(error.to_string());
    }
    let Some(detail) = input.detail else {
        return DetailBody::Loading;
    };

    let is_watched = input.watched.iter().any(|e| e.catalog_id == selected);
    let action = (input.user_rating > 0).then(|| {
        if is_watched {
            DetailAction::Remove
        } else {
            DetailAction::Add
        }
    });

    DetailBody::Loaded(DetailView {
        catalog_id: selected.to_string(),
        title: detail.title.clone(),
        poster: detail.poster_or_placeholder().to_string(),
        released: detail.released.clone(),
        runtime: detail.runtime.clone(),
        genre: detail.genre.clone(),
        imdb_rating: detail.imdb_rating_label(),
        plot: detail.plot.clone(),
        actors: detail.actors.clone(),
        director: detail.director.clone(),
        user_rating: input.user_rating,
        max_rating: MAX_USER_RATING,
        is_watched,
        action,
    })
}

fn watched_view(input: &ViewInput<'_>) -> WatchedView {
    let summary = &input.summary;
    WatchedView {
        summary: SummaryView {
            heading: "Movies you watched",
            count: format!("{} movies", summary.count),
            avg_imdb_rating: convert_decimal(summary.avg_imdb_rating),
            avg_user_rating: convert_decimal(summary.avg_user_rating),
            total_runtime: runtime_postfix(summary.total_runtime_minutes),
        },
        rows: input
            .watched
            .iter()
            .enumerate()
            .map(|(i, entry)| WatchedRow {
                catalog_id: entry.catalog_id.clone(),
                title: entry.title.clone(),
                poster: entry.poster_or_placeholder().to_string(),
                imdb_rating: entry
                    .imdb_rating
                    .map(convert_decimal)
                    .unwrap_or_else(|| "N/A".to_string()),
                user_rating: entry.user_rating,
                runtime: format!("{} min", entry.runtime_minutes.unwrap_or(0)),
                highlighted: i == input.watched_cursor,
            })
            .collect(),
    }
}
