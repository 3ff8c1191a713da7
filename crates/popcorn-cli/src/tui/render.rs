use super::keys::Focus;
use super::UiState;
use popcorn_core::view::{
    AppView, DetailAction, DetailBody, DetailView, PaneView, ResultsBody, SideBody, WatchedView, LOADING_MESSAGE,
};
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

pub fn draw(frame: &mut Frame, view: &AppView, ui: &UiState) {
    let [nav, main, footer] =
        Layout::vertical([Constraint::Length(3), Constraint::Min(0), Constraint::Length(1)]).areas(frame.area());
    let [left, right] = Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)]).areas(main);

    draw_nav(frame, nav, view, ui.focus == Focus::Search);
    draw_results(frame, left, &view.results, ui.focus == Focus::Results);
    draw_side(frame, right, &view.side, ui.focus == Focus::Watched);
    draw_footer(frame, footer, ui);
}

fn bold() -> Style {
    Style::default().add_modifier(Modifier::BOLD)
}

fn dim() -> Style {
    Style::default().fg(Color::DarkGray)
}

fn bordered(title: String, focused: bool) -> Block<'static> {
    let border = if focused { Color::Yellow } else { Color::DarkGray };
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(border))
        .title(title)
}

/// A collapsible box; the marker shows what the toggle key will do
fn pane_block(title: &str, open: bool, focused: bool) -> Block<'static> {
    let toggle = if open { "[–]" } else { "[+]" };
    bordered(format!(" {} {} ", title, toggle), focused)
}

fn error_paragraph(message: &str) -> Paragraph<'static> {
    Paragraph::new(format!("⛔️ {}", message)).style(Style::default().fg(Color::Red))
}

fn draw_nav(frame: &mut Frame, area: Rect, view: &AppView, focused: bool) {
    let block = bordered(format!(" 🍿 {} ", view.nav.logo), focused);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [input, count] = Layout::horizontal([Constraint::Min(0), Constraint::Length(24)]).areas(inner);

    let query = if view.nav.query.is_empty() {
        Span::styled(view.nav.placeholder, dim())
    } else {
        Span::raw(view.nav.query.clone())
    };
    let mut spans = vec![Span::raw("🔍 "), query];
    if focused {
        spans.push(Span::styled("▏", Style::default().fg(Color::Yellow)));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), input);
    frame.render_widget(
        Paragraph::new(format!("Found {} results", view.nav.result_count)).alignment(Alignment::Right),
        count,
    );
}

fn draw_results(frame: &mut Frame, area: Rect, pane: &PaneView<ResultsBody>, focused: bool) {
    let block = pane_block("Results", pane.open, focused);
    match &pane.body {
        None => frame.render_widget(block, area),
        Some(ResultsBody::Loading) => frame.render_widget(Paragraph::new(LOADING_MESSAGE).block(block), area),
        Some(ResultsBody::Error(message)) => frame.render_widget(error_paragraph(message).block(block), area),
        Some(ResultsBody::List(rows)) => {
            let items: Vec<ListItem> = rows
                .iter()
                .map(|row| {
                    let marker = if row.selected { "▶ " } else { "  " };
                    ListItem::new(vec![
                        Line::from(vec![Span::raw(marker), Span::styled(row.title.clone(), bold())]),
                        Line::from(Span::styled(format!("    🗓 {}", row.year), dim())),
                    ])
                })
                .collect();
            let mut state = ListState::default().with_selected(rows.iter().position(|r| r.highlighted));
            let list = List::new(items)
                .block(block)
                .highlight_style(Style::default().bg(Color::DarkGray));
            frame.render_stateful_widget(list, area, &mut state);
        }
    }
}

fn draw_side(frame: &mut Frame, area: Rect, pane: &PaneView<SideBody>, focused: bool) {
    let title = match &pane.body {
        Some(SideBody::Detail(_)) => "Movie",
        _ => "Watched",
    };
    let block = pane_block(title, pane.open, focused);
    match &pane.body {
        None => frame.render_widget(block, area),
        Some(SideBody::Detail(DetailBody::Loading)) => {
            frame.render_widget(Paragraph::new(LOADING_MESSAGE).block(block), area)
        }
        Some(SideBody::Detail(DetailBody::Error(message))) => {
            frame.render_widget(error_paragraph(message).block(block), area)
        }
        Some(SideBody::Detail(DetailBody::Loaded(detail))) => frame.render_widget(
            Paragraph::new(detail_lines(detail)).wrap(Wrap { trim: true }).block(block),
            area,
        ),
        Some(SideBody::Watched(watched)) => draw_watched(frame, area, watched, block, focused),
    }
}

fn detail_lines(detail: &DetailView) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from(Span::styled(detail.title.clone(), bold())),
        Line::from(format!("{} • {}", detail.released, detail.runtime)),
        Line::from(detail.genre.clone()),
        Line::from(format!("⭐️ {} IMDb rating", detail.imdb_rating)),
        Line::default(),
    ];

    if detail.is_watched {
        lines.push(Line::from(format!("You rated this movie {} ⭐️", detail.user_rating)));
    } else {
        let label = if detail.user_rating > 0 { detail.user_rating.to_string() } else { String::new() };
        lines.push(Line::from(vec![
            Span::styled(stars(detail.user_rating, detail.max_rating), Style::default().fg(Color::Yellow)),
            Span::raw(format!(" {}", label)),
        ]));
    }
    if let Some(action) = detail.action {
        let key = match action {
            DetailAction::Add => 'a',
            DetailAction::Remove => 'd',
        };
        lines.push(Line::from(Span::styled(format!("{}  ({})", action.label(), key), bold())));
    }

    lines.push(Line::default());
    lines.push(Line::from(Span::styled(
        detail.plot.clone(),
        Style::default().add_modifier(Modifier::ITALIC),
    )));
    lines.push(Line::from(format!("Starring {}", detail.actors)));
    lines.push(Line::from(format!("Directed by {}", detail.director)));
    lines
}

fn draw_watched(frame: &mut Frame, area: Rect, watched: &WatchedView, block: Block<'static>, focused: bool) {
    let inner = block.inner(area);
    frame.render_widget(block, area);
    let [summary_area, list_area] = Layout::vertical([Constraint::Length(3), Constraint::Min(0)]).areas(inner);

    let summary = &watched.summary;
    frame.render_widget(
        Paragraph::new(vec![
            Line::from(Span::styled(summary.heading, bold())),
            Line::from(format!(
                "#️⃣ {}   ⭐️ {}   🌟 {}   ⏳ {}",
                summary.count, summary.avg_imdb_rating, summary.avg_user_rating, summary.total_runtime
            )),
        ]),
        summary_area,
    );

    let items: Vec<ListItem> = watched
        .rows
        .iter()
        .map(|row| {
            ListItem::new(vec![
                Line::from(Span::styled(row.title.clone(), bold())),
                Line::from(format!(
                    "   ⭐️ {}   🌟 {}   ⏳ {}",
                    row.imdb_rating, row.user_rating, row.runtime
                )),
            ])
        })
        .collect();
    if !focused {
        frame.render_widget(List::new(items), list_area);
        return;
    }
    let mut state = ListState::default().with_selected(watched.rows.iter().position(|r| r.highlighted));
    let list = List::new(items)
        .highlight_style(Style::default().bg(Color::DarkGray))
        .highlight_symbol("✕ ");
    frame.render_stateful_widget(list, list_area, &mut state);
}

fn draw_footer(frame: &mut Frame, area: Rect, ui: &UiState) {
    let help = match ui.focus {
        Focus::Search => "type to search · ↑↓ move · enter open · esc close · tab commands · ctrl-c quit",
        Focus::Results => "0-9 rate · +/- adjust · a add · d remove · r/w panes · esc close · tab watched · q quit",
        Focus::Watched => "↑↓ move · enter open · x/del delete · r/w panes · esc close · tab search · q quit",
    };
    let mut spans = Vec::new();
    if let Some(status) = &ui.status {
        spans.push(Span::styled(status.clone(), Style::default().fg(Color::Green)));
        spans.push(Span::raw("  "));
    }
    spans.push(Span::styled(help, dim()));
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Filled stars up to `rating`, empty ones up to `max`
pub fn stars(rating: u8, max: u8) -> String {
    let filled = rating.min(max) as usize;
    format!("{}{}", "★".repeat(filled), "☆".repeat(max as usize - filled))
}
