//! Application state for the exercise TUI.

use chrono::{DateTime, Utc};

use crate::features::session::{
    CompletionSummary, ConsentGate, Notice, RunStatus, SessionLifecycle, SessionMachine,
    StartOutcome, TickEvent,
};

/// Application state.
pub struct App<L: SessionLifecycle> {
    /// The exercise run being driven.
    pub machine: SessionMachine<L>,
    /// Disclaimer acceptance for this run of the app.
    pub consent: ConsentGate,
    /// Status message to display.
    pub status: Option<String>,
    /// Latest notices from the state machine.
    pub notices: Vec<Notice>,
    /// Whether the app should quit.
    pub should_quit: bool,
}

impl<L: SessionLifecycle> App<L> {
    /// Create a new app instance and request a start.
    pub fn new(machine: SessionMachine<L>, consent: ConsentGate) -> Self {
        let mut app = Self {
            machine,
            consent,
            status: None,
            notices: Vec::new(),
            should_quit: false,
        };
        app.start();
        app
    }

    /// Request a start from idle.
    pub fn start(&mut self) {
        self.status = match self.machine.start(&self.consent) {
            StartOutcome::CountdownStarted => Some("Get comfortable...".to_string()),
            StartOutcome::DisclaimerRequired => None,
            StartOutcome::Ignored => return,
        };
    }

    /// Advance the machine by one tick.
    pub fn on_tick(&mut self, now: DateTime<Utc>) {
        for event in self.machine.tick(now) {
            match event {
                TickEvent::Started => self.status = None,
                TickEvent::RoundCompleted(round) => {
                    self.status = Some(format!("Round {round} complete"));
                }
                TickEvent::Completed => {
                    self.status = Some("Well done. r: again | q: quit".to_string());
                }
                TickEvent::CountdownStep(_) | TickEvent::PhaseChanged(_) => {}
            }
        }
        self.collect_notices();
    }

    /// Accept the disclaimer.
    pub fn accept_disclaimer(&mut self) {
        if self.machine.accept_disclaimer(&mut self.consent) {
            self.status = Some("Get comfortable...".to_string());
        }
    }

    /// Decline the disclaimer.
    pub fn decline_disclaimer(&mut self) {
        if self.machine.decline_disclaimer() {
            self.status = Some("Exercise not started. s: start | q: quit".to_string());
        }
    }

    /// Pause or resume.
    pub fn toggle_pause(&mut self) {
        if self.machine.status() == RunStatus::Running {
            let paused = self.machine.toggle_pause();
            self.status = paused.then(|| "Paused. space: resume".to_string());
        }
    }

    /// Add a round.
    pub fn add_round(&mut self) {
        let total = self.machine.add_round();
        self.status = Some(format!("{total} rounds"));
    }

    /// Remove a round.
    pub fn remove_round(&mut self) {
        let total = self.machine.remove_round();
        self.status = Some(format!("{total} rounds"));
    }

    /// End the session early.
    pub fn end_session(&mut self) {
        if self.machine.end_session() {
            self.status = Some("Session ended. r: again | q: quit".to_string());
        }
    }

    /// Stop immediately.
    pub fn emergency_stop(&mut self) {
        if self.machine.emergency_stop() {
            self.status = Some("Stopped. r: again | q: quit".to_string());
            self.collect_notices();
        }
    }

    /// Start the same exercise again after it finished or was stopped.
    pub fn start_again(&mut self) {
        if self.machine.restart() {
            self.notices.clear();
            self.start();
        }
    }

    /// Summary of the finished run, if it completed.
    pub fn summary(&self) -> Option<&CompletionSummary> {
        self.machine.summary()
    }

    /// Quit, stopping any run in progress.
    pub fn quit(&mut self) {
        self.machine.end_session();
        self.should_quit = true;
    }

    fn collect_notices(&mut self) {
        let fresh = self.machine.drain_notices();
        if !fresh.is_empty() {
            self.notices = fresh;
        }
    }
}
