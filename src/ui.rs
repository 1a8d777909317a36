//! Terminal UI rendering.
//!
//! All drawing logic lives here, separated from application state ([`App`])
//! and input handling ([`crate::input`]).
//!
//! The screen is a search box on top, the record list (or a loading / empty
//! placeholder) in the middle and a one-line status bar at the bottom.  A
//! visible toast is drawn over the top of everything.

use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap},
    Frame,
};

use crate::app::{filter, App, Mode};
use crate::record::{DataItem, HistoricalItem, Record};
use crate::toast::{Severity, Toast};

/// How a record type is shown as one list row.
pub trait RowView {
    /// Heading of the list block.
    const TITLE: &'static str;

    fn row(&self) -> ListItem<'_>;
}

impl RowView for DataItem {
    const TITLE: &'static str = " Data ";

    fn row(&self) -> ListItem<'_> {
        ListItem::new(Line::from(vec![
            Span::styled(format!("#{:<6}", self.id), Style::default().fg(Color::DarkGray)),
            Span::raw(" "),
            Span::styled(
                &self.name,
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            Span::styled(&self.description, Style::default().fg(Color::Gray)),
        ]))
    }
}

impl RowView for HistoricalItem {
    const TITLE: &'static str = " Historical Events ";

    fn row(&self) -> ListItem<'_> {
        let header = Line::from(vec![
            Span::styled(&self.date, Style::default().fg(Color::DarkGray)),
            Span::raw("  "),
            Span::styled(
                format!("{} • {}", self.category_primary, self.category_secondary),
                Style::default().fg(Color::Blue),
            ),
            Span::raw("  "),
            Span::styled(
                format!("[{}]", self.language.to_uppercase()),
                Style::default().fg(Color::Cyan),
            ),
        ]);
        let body = Line::from(Span::styled(
            &self.description,
            Style::default().fg(Color::White),
        ));

        ListItem::new(Text::from(vec![header, body, Line::raw("")]))
    }
}

/// Accent colour for a toast severity.
pub fn accent(severity: Severity) -> Color {
    match severity {
        Severity::Info => Color::Blue,
        Severity::Success => Color::Green,
        Severity::Warning => Color::Yellow,
        Severity::Error => Color::Red,
    }
}

/// Draw the complete UI for one frame.
pub fn draw<R: Record + RowView>(app: &mut App<R>, frame: &mut Frame) {
    let [search_area, main_area, status_area] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(1),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    draw_search_bar(app, frame, search_area);
    draw_records(app, frame, main_area);
    draw_status_bar(app, frame, status_area);

    if let Some(toast) = app.toasts.current() {
        draw_toast(&toast, frame, frame.area());
    }
}

fn draw_search_bar<R: Record>(app: &App<R>, frame: &mut Frame, area: Rect) {
    let active = app.mode == Mode::Search;
    let text = if app.search.is_empty() && !active {
        Span::styled("press / to search", Style::default().fg(Color::DarkGray))
    } else {
        Span::raw(app.search.as_str())
    };

    let border = if active {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let bar = Paragraph::new(Line::from(vec![Span::raw("> "), text])).block(
        Block::default()
            .title(" Search ")
            .borders(Borders::ALL)
            .border_style(border),
    );
    frame.render_widget(bar, area);

    if active {
        let typed = u16::try_from(app.search.chars().count()).unwrap_or(u16::MAX);
        let x = area.x.saturating_add(3).saturating_add(typed);
        frame.set_cursor_position((x.min(area.right().saturating_sub(2)), area.y + 1));
    }
}

fn draw_records<R: Record + RowView>(app: &mut App<R>, frame: &mut Frame, area: Rect) {
    let block = Block::default().title(R::TITLE).borders(Borders::ALL);

    if app.view_model.state().is_loading {
        let loading = Paragraph::new("Loading…")
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::Yellow))
            .block(block);
        frame.render_widget(loading, area);
        return;
    }

    let list_items: Vec<ListItem> = filter(&app.view_model.state().records, &app.search)
        .into_iter()
        .map(RowView::row)
        .collect();

    if list_items.is_empty() {
        let mut lines = vec![
            Line::styled("No results found", Style::default().fg(Color::Gray)),
            Line::raw(""),
            Line::styled("press r to load again", Style::default().fg(Color::DarkGray)),
        ];
        if let Some(message) = &app.view_model.state().error_message {
            lines.insert(0, Line::styled(message.as_str(), Style::default().fg(Color::Red)));
        }
        let empty = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let list = List::new(list_items)
        .block(block)
        .highlight_style(
            Style::default()
                .add_modifier(Modifier::BOLD)
                .bg(Color::DarkGray),
        )
        .highlight_symbol("▸ ");

    frame.render_stateful_widget(list, area, &mut app.list_state);
}

fn draw_status_bar<R: Record>(app: &App<R>, frame: &mut Frame, area: Rect) {
    let state = app.view_model.state();
    let (status, colour) = match (&state.error_message, state.is_loading) {
        (_, true) => ("Loading…".to_string(), Color::Yellow),
        (Some(message), false) => (message.clone(), Color::Red),
        (None, false) => ("Ready".to_string(), Color::Yellow),
    };

    let shown = app.filtered().len();
    let total = state.records.len();
    let count = if shown == total {
        format!("{total} {}", R::NOUN)
    } else {
        format!("{shown}/{total} {}", R::NOUN)
    };

    let help = match app.mode {
        Mode::Search => "  Enter/Esc: done  Ctrl-u: clear",
        Mode::Browse => "  q: quit  /: search  r: reload  x: close toast  ↑/↓: scroll",
    };

    let bar = Paragraph::new(Line::from(vec![
        Span::raw(" "),
        Span::styled(status, Style::default().fg(colour)),
        Span::raw("  "),
        Span::styled(count, Style::default().fg(Color::Green)),
        Span::raw(help),
    ]));
    frame.render_widget(bar, area);
}

fn draw_toast(toast: &Toast, frame: &mut Frame, area: Rect) {
    let width = area.width.saturating_sub(4).min(60);
    let height = area.height.min(4);
    let rect = Rect {
        x: area.x + (area.width.saturating_sub(width)) / 2,
        y: area.y,
        width,
        height,
    };

    let colour = accent(toast.severity);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(colour))
        .title(Line::from(vec![Span::styled(
            format!(" {} ", toast.severity.title()),
            Style::default().fg(colour).add_modifier(Modifier::BOLD),
        )]))
        .title(Line::from(" x ").alignment(Alignment::Right));

    let body = Paragraph::new(toast.message.as_str())
        .wrap(Wrap { trim: true })
        .block(block);

    frame.render_widget(Clear, rect);
    frame.render_widget(body, rect);
}
