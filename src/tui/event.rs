//! Event handling for the exercise TUI.

use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::error::BreatheError;
use crate::features::session::RunStatus;

/// Action to take after a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Quit the application.
    Quit,
    /// Start from idle.
    Start,
    /// Accept the safety disclaimer.
    AcceptDisclaimer,
    /// Decline the safety disclaimer.
    DeclineDisclaimer,
    /// Pause or resume.
    TogglePause,
    /// One more round.
    AddRound,
    /// One round fewer.
    RemoveRound,
    /// End the session early.
    EndSession,
    /// Stop immediately.
    EmergencyStop,
    /// Run the exercise again.
    StartAgain,
}

/// Wait up to `timeout` for a key press.
///
/// # Errors
///
/// Returns an error if event polling fails.
pub fn next_key(timeout: Duration) -> Result<Option<KeyEvent>, BreatheError> {
    if !event::poll(timeout).map_err(|e| BreatheError::Terminal(format!("Event poll failed: {e}")))? {
        return Ok(None);
    }

    match event::read().map_err(|e| BreatheError::Terminal(format!("Event read failed: {e}")))? {
        Event::Key(key) if key.kind == KeyEventKind::Press => Ok(Some(key)),
        _ => Ok(None),
    }
}

/// Map a key press to an action for the current status.
pub fn action_for(key: KeyEvent, status: RunStatus) -> Option<Action> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Action::Quit);
    }

    if status == RunStatus::AwaitingDisclaimer {
        return match key.code {
            KeyCode::Char('y' | 'Y') | KeyCode::Enter => Some(Action::AcceptDisclaimer),
            KeyCode::Char('n' | 'N') | KeyCode::Esc => Some(Action::DeclineDisclaimer),
            KeyCode::Char('q') => Some(Action::Quit),
            _ => None,
        };
    }

    let active = matches!(status, RunStatus::Countdown { .. } | RunStatus::Running);

    match key.code {
        KeyCode::Char('x') | KeyCode::Esc if active => Some(Action::EmergencyStop),
        KeyCode::Char('e') if active => Some(Action::EndSession),
        KeyCode::Char(' ') if status == RunStatus::Running => Some(Action::TogglePause),
        KeyCode::Char('+' | '=') | KeyCode::Up => Some(Action::AddRound),
        KeyCode::Char('-') | KeyCode::Down => Some(Action::RemoveRound),
        KeyCode::Char('s') | KeyCode::Enter if status == RunStatus::Idle => Some(Action::Start),
        KeyCode::Char('r')
            if matches!(status, RunStatus::Completed | RunStatus::Aborted { .. }) =>
        {
            Some(Action::StartAgain)
        }
        KeyCode::Char('q') => Some(Action::Quit),
        KeyCode::Esc if !active => Some(Action::Quit),
        _ => None,
    }
}
