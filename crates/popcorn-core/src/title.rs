/// Title shown while no detail view is open
pub const DEFAULT_TITLE: &str = "usePopcorn";

/// Wherever the app's title is displayed (terminal window title, test recorder)
pub trait TitleSurface {
    fn set_title(&mut self, title: &str);
}

/// Title for an open detail view
pub fn movie_title(title: &str) -> String {
    format!("Movie | {}", title)
}

/// Discards title updates, for surfaces that cannot show one
#[derive(Debug, Default, Clone, Copy)]
pub struct NullTitle;

impl TitleSurface for NullTitle {
    fn set_title(&mut self, _title: &str) {}
}
