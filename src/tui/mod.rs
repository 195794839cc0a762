//! Terminal User Interface (TUI) for running an exercise.
//!
//! Drives a [`SessionMachine`] with a fixed tick and renders the phase,
//! countdown and round progress. Built with ratatui and crossterm.

mod app;
mod event;
mod ui;

pub use app::App;

use std::io;
use std::time::{Duration, Instant};

use chrono::Utc;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use tracing::debug;

use crate::error::BreatheError;
use crate::features::session::{CompletionSummary, ConsentGate, SessionLifecycle, SessionMachine};

use self::event::Action;

/// Run an exercise in the terminal until the user quits.
///
/// Returns the completion summary if the last run finished all rounds.
///
/// # Errors
///
/// Returns an error if the terminal cannot be set up or drawn.
pub fn run<L: SessionLifecycle>(
    machine: SessionMachine<L>,
    consent: ConsentGate,
) -> Result<Option<CompletionSummary>, BreatheError> {
    enable_raw_mode().map_err(|e| BreatheError::Terminal(format!("Failed to enable raw mode: {e}")))?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)
        .map_err(|e| BreatheError::Terminal(format!("Failed to setup terminal: {e}")))?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)
        .map_err(|e| BreatheError::Terminal(format!("Failed to create terminal: {e}")))?;

    let mut app = App::new(machine, consent);
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode().ok();
    execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
    terminal.show_cursor().ok();

    result.map(|()| app.summary().cloned())
}

/// Run the main application loop.
fn run_app<B: Backend, L: SessionLifecycle>(
    terminal: &mut Terminal<B>,
    app: &mut App<L>,
) -> Result<(), BreatheError> {
    let tick = app.machine.timing().tick_interval.max(Duration::from_millis(1));
    let mut last_tick = Instant::now();

    while !app.should_quit {
        terminal
            .draw(|frame| ui::render(frame, app))
            .map_err(|e| BreatheError::Terminal(format!("Failed to draw: {e}")))?;

        let timeout = tick.saturating_sub(last_tick.elapsed());
        if let Some(key) = event::next_key(timeout)? {
            if let Some(action) = event::action_for(key, app.machine.status()) {
                debug!(?action, "key action");
                apply(app, action);
            }
        }

        if last_tick.elapsed() >= tick {
            app.on_tick(Utc::now());
            last_tick = Instant::now();
        }
    }

    Ok(())
}

fn apply<L: SessionLifecycle>(app: &mut App<L>, action: Action) {
    match action {
        Action::Quit => app.quit(),
        Action::Start => app.start(),
        Action::AcceptDisclaimer => app.accept_disclaimer(),
        Action::DeclineDisclaimer => app.decline_disclaimer(),
        Action::TogglePause => app.toggle_pause(),
        Action::AddRound => app.add_round(),
        Action::RemoveRound => app.remove_round(),
        Action::EndSession => app.end_session(),
        Action::EmergencyStop => app.emergency_stop(),
        Action::StartAgain => app.start_again(),
    }
}
