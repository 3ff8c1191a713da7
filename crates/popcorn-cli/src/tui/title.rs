use crossterm::terminal::SetTitle;
use popcorn_core::TitleSurface;
use tracing::debug;

/// The terminal window title
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalTitle;

impl TitleSurface for TerminalTitle {
    fn set_title(&mut self, title: &str) {
        if let Err(e) = crossterm::execute!(std::io::stdout(), SetTitle(title)) {
            debug!(error = %e, "Failed to set terminal title");
        }
    }
}
