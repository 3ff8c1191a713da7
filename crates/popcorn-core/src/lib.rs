pub mod app;
pub mod debounce;
pub mod detail;
pub mod event;
pub mod request;
pub mod search;
pub mod store;
pub mod title;
pub mod view;
pub mod watched;

#[cfg(test)]
mod testing;

pub use app::App;
pub use debounce::Debouncer;
pub use detail::{DetailApplied, DetailController, Selection, MAX_USER_RATING};
pub use event::{channel, CoreEvent, EventReceiver, EventSender};
pub use request::{InFlight, RequestId};
pub use search::{SearchApplied, SearchController, SearchStart};
pub use store::{JsonFileStore, MemoryStore, StoreError, WatchedStore};
pub use title::{movie_title, NullTitle, TitleSurface, DEFAULT_TITLE};
pub use view::{AppView, Pane, PaneState};
pub use watched::{convert_decimal, runtime_postfix, WatchedError, WatchedListModel, WatchedSummary};
