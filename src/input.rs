//! Keyboard input handling.
//!
//! Maps terminal key events to [`App`] actions.  In search mode printable
//! keys edit the search text; in browse mode they are commands.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::app::{App, Mode};
use crate::record::Record;

/// Process a single key event, updating app state accordingly.
///
/// Only reacts to key-press events (ignoring release / repeat) so that each
/// physical keypress triggers exactly one action.
pub fn handle_key_event<R: Record>(app: &mut App<R>, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        match key.code {
            KeyCode::Char('c') => app.quit = true,
            KeyCode::Char('u') => app.clear_search(),
            _ => {}
        }
        return;
    }

    match app.mode {
        Mode::Search => match key.code {
            KeyCode::Esc | KeyCode::Enter => app.leave_search(),
            KeyCode::Backspace => app.pop_search_char(),
            KeyCode::Down => app.select_next(),
            KeyCode::Up => app.select_previous(),
            KeyCode::Char(c) => app.push_search_char(c),
            _ => {}
        },
        Mode::Browse => match key.code {
            KeyCode::Char('q') | KeyCode::Esc => app.quit = true,
            KeyCode::Char('/') => app.enter_search(),
            KeyCode::Char('r') => app.refresh(),
            KeyCode::Char('x') => app.dismiss_toast(),
            KeyCode::Down | KeyCode::Char('j') => app.select_next(),
            KeyCode::Up | KeyCode::Char('k') => app.select_previous(),
            KeyCode::Home | KeyCode::Char('g') => app.select_first(),
            KeyCode::End | KeyCode::Char('G') => app.select_last(),
            _ => {}
        },
    }
}
