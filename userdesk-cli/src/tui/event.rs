//! Event handling for the TUI

use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::app::{App, Focus};

/// Poll for events with timeout
pub fn poll_event(timeout: Duration) -> std::io::Result<Option<Event>> {
    if event::poll(timeout)? {
        Ok(Some(event::read()?))
    } else {
        Ok(None)
    }
}

/// Result of handling a key event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandleResult {
    /// Continue running
    Continue,
    /// Quit the application
    Quit,
}

/// Handle a key event
pub fn handle_key(app: &mut App, key: KeyEvent) -> HandleResult {
    if key.kind != KeyEventKind::Press {
        return HandleResult::Continue;
    }

    // Global quit shortcuts (Ctrl+C, Ctrl+Q)
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        if let KeyCode::Char('c') | KeyCode::Char('q') = key.code {
            return HandleResult::Quit;
        }
    }

    // Notices block everything until dismissed
    if app.list.state().notice().is_some() {
        app.list.dismiss_notice();
        return HandleResult::Continue;
    }

    if app.pending_delete().is_some() {
        let confirmed = matches!(key.code, KeyCode::Char('y') | KeyCode::Char('Y'));
        app.answer_delete(confirmed);
        return HandleResult::Continue;
    }

    if app.list.state().is_loading() {
        return match key.code {
            KeyCode::Char('q') => HandleResult::Quit,
            _ => HandleResult::Continue,
        };
    }

    match app.focus {
        Focus::List => handle_list_keys(app, key),
        Focus::Form(_) => handle_form_keys(app, key),
    }
}

fn handle_list_keys(app: &mut App, key: KeyEvent) -> HandleResult {
    match key.code {
        KeyCode::Char('q') => return HandleResult::Quit,

        KeyCode::Char('j') | KeyCode::Down => app.select_next(),
        KeyCode::Char('k') | KeyCode::Up => app.select_prev(),
        KeyCode::Char('g') | KeyCode::Home => app.select_first(),
        KeyCode::Char('G') | KeyCode::End => app.select_last(),

        KeyCode::Char('e') | KeyCode::Enter => app.edit_selected(),
        KeyCode::Char('d') | KeyCode::Delete => app.request_delete_selected(),

        KeyCode::Tab | KeyCode::Char('i') | KeyCode::Char('a') => app.next_field(),
        KeyCode::BackTab => app.prev_field(),

        KeyCode::Esc => app.cancel_edit(),
        _ => {}
    }
    HandleResult::Continue
}

fn handle_form_keys(app: &mut App, key: KeyEvent) -> HandleResult {
    match key.code {
        KeyCode::Esc => app.focus_list(),
        KeyCode::Tab | KeyCode::Down => app.next_field(),
        KeyCode::BackTab | KeyCode::Up => app.prev_field(),
        KeyCode::Enter => {
            app.submit();
        }

        KeyCode::Backspace => app.backspace(),
        KeyCode::Delete => app.delete_char(),
        KeyCode::Left => app.cursor_left(),
        KeyCode::Right => app.cursor_right(),
        KeyCode::Home => app.cursor_home(),
        KeyCode::End => app.cursor_end(),

        KeyCode::Char(c) => app.insert_char(c),
        _ => {}
    }
    HandleResult::Continue
}
