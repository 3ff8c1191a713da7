pub mod detail;
pub mod numeric;
pub mod search_result;
pub mod watched;

pub use detail::MovieDetail;
pub use numeric::{is_not_available, parse_rating, parse_runtime_minutes};
pub use search_result::SearchResultItem;
pub use watched::WatchedEntry;

/// Shown in place of a poster the catalog does not have
pub const POSTER_PLACEHOLDER: &str = "https://placehold.net/400x600.png";
