//! Event handling for the TUI

use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};

use super::app::{Action, App, Focus};

/// Poll for events with timeout
pub fn poll_event(timeout: Duration) -> std::io::Result<Option<Event>> {
    if event::poll(timeout)? {
        Ok(Some(event::read()?))
    } else {
        Ok(None)
    }
}

/// Handle a key event, returning an action that needs the API
pub fn handle_key(app: &mut App, key: KeyEvent) -> Option<Action> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Action::Quit);
    }

    // Any key acknowledges an open alert
    if app.alert.is_some() {
        app.dismiss_alert();
        return None;
    }

    match key.code {
        KeyCode::Tab => {
            app.focus = app.focus.next();
            return None;
        }
        KeyCode::BackTab => {
            app.focus = app.focus.prev();
            return None;
        }
        _ => {}
    }

    if app.focus.is_input() {
        handle_input(app, key)
    } else {
        handle_list(app, key)
    }
}

/// Keys while a text field has focus
fn handle_input(app: &mut App, key: KeyEvent) -> Option<Action> {
    match key.code {
        KeyCode::Enter => match app.focus {
            Focus::TitleInput => Some(Action::AddTodo),
            // Enter in the name field moves on to email
            Focus::NameInput => {
                app.focus = Focus::EmailInput;
                None
            }
            Focus::EmailInput => Some(Action::AddContact),
            Focus::TodoList => None,
        },
        KeyCode::Esc => {
            app.focus = Focus::TodoList;
            None
        }
        KeyCode::Backspace => {
            if let Some(input) = app.focused_input() {
                input.pop();
            }
            None
        }
        KeyCode::Char(c) => {
            if let Some(input) = app.focused_input() {
                input.push(c);
            }
            None
        }
        _ => None,
    }
}

/// Keys while the todo list has focus
fn handle_list(app: &mut App, key: KeyEvent) -> Option<Action> {
    match key.code {
        KeyCode::Char('q') => Some(Action::Quit),
        KeyCode::Char('j') | KeyCode::Down => {
            app.select_next();
            None
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.select_prev();
            None
        }
        KeyCode::Enter | KeyCode::Char(' ') => Some(Action::ToggleSelected),
        KeyCode::Char('d') | KeyCode::Delete => Some(Action::DeleteSelected),
        KeyCode::Char('a') | KeyCode::Char('i') => {
            app.focus = Focus::TitleInput;
            None
        }
        _ => None,
    }
}
