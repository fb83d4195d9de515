//! Event handling for the timer screen.

use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::error::FocusdeckError;
use crate::tui::app::App;

const HELP: &str = "space:start/pause | s:skip | r:reset | j/k:nav | Enter:attach task | q:quit";

/// Action to take after handling an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Quit the application.
    Quit,
    /// Start or pause the countdown.
    Toggle,
    /// End the current phase now.
    Skip,
    /// Reset to a fresh work phase.
    Reset,
    /// Attach or detach the selected task.
    Attach,
}

/// Wait up to `timeout` for a terminal event.
///
/// Returns an action to take, or None if no action is needed.
///
/// # Errors
///
/// Returns an error if event polling fails.
pub fn handle_events(app: &mut App, timeout: Duration) -> Result<Option<Action>, FocusdeckError> {
    if event::poll(timeout).map_err(|e| FocusdeckError::Terminal(format!("Event poll failed: {e}")))? {
        if let Event::Key(key) =
            event::read().map_err(|e| FocusdeckError::Terminal(format!("Event read failed: {e}")))?
        {
            if key.kind == KeyEventKind::Press {
                return Ok(handle_key(app, key));
            }
        }
    }

    Ok(None)
}

/// Map a key press to an action, applying navigation directly.
pub fn handle_key(app: &mut App, key: KeyEvent) -> Option<Action> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Action::Quit);
    }

    if key.code != KeyCode::Char('g') {
        app.cancel_pending();
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),

        KeyCode::Char(' ' | 'p') => Some(Action::Toggle),
        KeyCode::Char('s') => Some(Action::Skip),
        KeyCode::Char('r') => Some(Action::Reset),
        KeyCode::Enter => Some(Action::Attach),

        // Navigation - vim style
        KeyCode::Char('j') | KeyCode::Down => {
            app.select_next();
            None
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.select_previous();
            None
        }
        KeyCode::Char('g') => {
            app.handle_g();
            None
        }
        KeyCode::Char('G') | KeyCode::End => {
            app.select_last();
            None
        }
        KeyCode::Home => {
            app.select_first();
            None
        }

        KeyCode::Char('?') => {
            app.status = Some(HELP.to_string());
            None
        }

        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::testing::app;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_action_keys() {
        let mut app = app();
        assert_eq!(handle_key(&mut app, press(KeyCode::Char(' '))), Some(Action::Toggle));
        assert_eq!(handle_key(&mut app, press(KeyCode::Char('s'))), Some(Action::Skip));
        assert_eq!(handle_key(&mut app, press(KeyCode::Char('r'))), Some(Action::Reset));
        assert_eq!(handle_key(&mut app, press(KeyCode::Enter)), Some(Action::Attach));
        assert_eq!(handle_key(&mut app, press(KeyCode::Char('q'))), Some(Action::Quit));
        assert_eq!(handle_key(&mut app, press(KeyCode::Esc)), Some(Action::Quit));
    }

    #[test]
    fn test_ctrl_c_quits() {
        let mut app = app();
        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(handle_key(&mut app, key), Some(Action::Quit));
    }

    #[test]
    fn test_navigation_keys() {
        let mut app = app();
        assert_eq!(handle_key(&mut app, press(KeyCode::Char('j'))), None);
        assert_eq!(app.selected, 1);
        handle_key(&mut app, press(KeyCode::Char('k')));
        assert_eq!(app.selected, 0);
        handle_key(&mut app, press(KeyCode::Char('G')));
        assert_eq!(app.selected, 1);
        handle_key(&mut app, press(KeyCode::Char('g')));
        handle_key(&mut app, press(KeyCode::Char('g')));
        assert_eq!(app.selected, 0);
    }

    #[test]
    fn test_help_sets_status() {
        let mut app = app();
        assert_eq!(handle_key(&mut app, press(KeyCode::Char('?'))), None);
        assert_eq!(app.status.as_deref(), Some(HELP));
    }
}
