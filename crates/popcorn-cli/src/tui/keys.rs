use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use popcorn_core::Pane;

/// Which region receives plain character keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    /// Characters edit the query
    #[default]
    Search,
    /// Characters are commands: ratings, add, remove, pane toggles
    Results,
    /// Same commands, but movement, enter and delete act on watched rows
    Watched,
}

impl Focus {
    pub fn toggled(self) -> Self {
        match self {
            Focus::Search => Focus::Results,
            Focus::Results => Focus::Watched,
            Focus::Watched => Focus::Search,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    Input(char),
    Backspace,
    ClearQuery,
    MoveUp,
    MoveDown,
    Select,
    Dismiss,
    SwitchFocus,
    Rate(u8),
    AdjustRating(i8),
    AddWatched,
    RemoveWatched,
    TogglePane(Pane),
}

pub fn map_key(key: KeyEvent, focus: Focus) -> Option<Action> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Some(Action::Quit),
            KeyCode::Char('u') if focus == Focus::Search => Some(Action::ClearQuery),
            _ => None,
        };
    }

    match key.code {
        KeyCode::Esc => Some(Action::Dismiss),
        KeyCode::Tab | KeyCode::BackTab => Some(Action::SwitchFocus),
        KeyCode::Up => Some(Action::MoveUp),
        KeyCode::Down => Some(Action::MoveDown),
        KeyCode::Enter => Some(Action::Select),
        KeyCode::Backspace if focus == Focus::Search => Some(Action::Backspace),
        KeyCode::Delete if focus == Focus::Watched => Some(Action::RemoveWatched),
        KeyCode::Char(c) => match focus {
            Focus::Search => Some(Action::Input(c)),
            Focus::Results | Focus::Watched => command_key(c),
        },
        _ => None,
    }
}

fn command_key(c: char) -> Option<Action> {
    match c {
        // Ten stars, one key each; 0 is the tenth
        '0' => Some(Action::Rate(10)),
        '1'..='9' => c.to_digit(10).map(|d| Action::Rate(d as u8)),
        '+' | '=' => Some(Action::AdjustRating(1)),
        '-' => Some(Action::AdjustRating(-1)),
        'a' => Some(Action::AddWatched),
        'd' | 'x' => Some(Action::RemoveWatched),
        'j' => Some(Action::MoveDown),
        'k' => Some(Action::MoveUp),
        'r' => Some(Action::TogglePane(Pane::Results)),
        'w' => Some(Action::TogglePane(Pane::Side)),
        'q' => Some(Action::Quit),
        _ => None,
    }
}
