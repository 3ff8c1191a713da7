//! Interactive browser: one loop that drains settled requests, advances the
//! debounce timer, redraws from the view model and waits for a key.

mod keys;
mod render;
mod title;

pub use title::TerminalTitle;

use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use crossterm::event::{self, Event, KeyEventKind};
use keys::{Action, Focus};
use popcorn_core::{App, EventReceiver, TitleSurface, WatchedStore, MAX_USER_RATING};
use ratatui::DefaultTerminal;
use std::time::{Duration, Instant};
use tracing::{info, warn};

/// Longest the loop blocks on the keyboard before checking for settled requests
const MAX_POLL: Duration = Duration::from_millis(100);

#[derive(Debug, Default)]
pub struct UiState {
    pub focus: Focus,
    pub should_quit: bool,
    /// One-line feedback shown in the footer until the next key
    pub status: Option<String>,
}

pub fn run<S: WatchedStore, T: TitleSurface>(mut app: App<S, T>, mut events: EventReceiver) -> Result<()> {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        ratatui::restore();
        default_hook(info);
    }));

    let mut terminal = ratatui::init();
    let result = run_loop(&mut terminal, &mut app, &mut events);
    ratatui::restore();
    info!("Browser closed");
    result
}

fn run_loop<S: WatchedStore, T: TitleSurface>(
    terminal: &mut DefaultTerminal,
    app: &mut App<S, T>,
    events: &mut EventReceiver,
) -> Result<()> {
    let mut ui = UiState::default();

    loop {
        while let Ok(event) = events.try_recv() {
            app.handle_event(event);
        }
        app.tick(Instant::now());

        let view = app.view();
        terminal
            .draw(|frame| render::draw(frame, &view, &ui))
            .wrap_err("Failed to draw terminal frame")?;

        let timeout = poll_timeout(app.next_deadline(), Instant::now());
        if event::poll(timeout).wrap_err("Failed to poll for terminal events")? {
            if let Event::Key(key) = event::read().wrap_err("Failed to read terminal event")? {
                if key.kind == KeyEventKind::Press {
                    if let Some(action) = keys::map_key(key, ui.focus) {
                        apply(app, &mut ui, action, Instant::now());
                    }
                }
            }
        }

        if ui.should_quit {
            return Ok(());
        }
    }
}

/// Wake up for the debounce deadline, but never sleep past `MAX_POLL`
pub fn poll_timeout(deadline: Option<Instant>, now: Instant) -> Duration {
    match deadline {
        Some(deadline) => deadline.saturating_duration_since(now).min(MAX_POLL),
        None => MAX_POLL,
    }
}

fn apply<S: WatchedStore, T: TitleSurface>(app: &mut App<S, T>, ui: &mut UiState, action: Action, now: Instant) {
    ui.status = None;
    match action {
        Action::Quit => ui.should_quit = true,
        Action::Input(c) => app.push_char(c, now),
        Action::Backspace => app.pop_char(now),
        Action::ClearQuery => app.set_query("", now),
        Action::MoveUp if ui.focus == Focus::Watched => app.move_watched_cursor(-1),
        Action::MoveDown if ui.focus == Focus::Watched => app.move_watched_cursor(1),
        Action::Select if ui.focus == Focus::Watched => app.select_highlighted_watched(),
        Action::MoveUp => app.move_cursor(-1),
        Action::MoveDown => app.move_cursor(1),
        Action::Select => app.select_highlighted(),
        Action::Dismiss => {
            app.handle_dismiss_key();
        }
        Action::SwitchFocus => ui.focus = ui.focus.toggled(),
        Action::Rate(rating) => app.set_user_rating(rating),
        Action::AdjustRating(delta) => {
            let next = (i16::from(app.detail().user_rating()) + i16::from(delta)).clamp(0, i16::from(MAX_USER_RATING));
            app.set_user_rating(next as u8);
        }
        Action::AddWatched => match app.add_selected_to_watched() {
            Ok(true) => ui.status = Some("Added to the watched list".to_string()),
            Ok(false) => {}
            Err(e) => {
                warn!(error = %e, "Could not add to watched list");
                ui.status = Some(e.to_string());
            }
        },
        Action::RemoveWatched => {
            let removed = if ui.focus == Focus::Watched {
                app.remove_highlighted_watched()
            } else {
                app.remove_selected_from_watched()
            };
            if removed > 0 {
                ui.status = Some("Removed from the watched list".to_string());
            }
        }
        Action::TogglePane(pane) => app.toggle_pane(pane),
    }
}
