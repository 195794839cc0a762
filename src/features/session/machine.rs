//! Exercise session state machine.
//!
//! Drives one breathing exercise run:
//!
//! ```text
//! Idle -> (AwaitingDisclaimer) -> Countdown -> Running <-> paused
//!                                                |
//!                                   Completed | Aborted -> Idle
//! ```
//!
//! Time advances only through [`SessionMachine::tick`], one fixed step per
//! call. The countdown and the phase timer share that single tick and are
//! never active together. Lifecycle calls never block or roll back local
//! state; failures become [`Notice`]s for the UI.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info, warn};

use super::lifecycle::{ConsentGate, SessionLifecycle};
use crate::error::BreatheError;
use crate::features::exercise::{Catalog, ExerciseDefinition, Phase};

/// Countdown and tick timing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimingSettings {
    /// Number of countdown steps (3 -> 2 -> 1)
    pub countdown_steps: u32,
    /// Delay between countdown steps
    pub countdown_step: Duration,
    /// Phase timer resolution
    pub tick_interval: Duration,
}

impl Default for TimingSettings {
    fn default() -> Self {
        Self {
            countdown_steps: 3,
            countdown_step: Duration::from_millis(1000),
            tick_interval: Duration::from_millis(100),
        }
    }
}

impl TimingSettings {
    #[allow(clippy::cast_possible_truncation)]
    fn tick_ms(&self) -> u64 {
        (self.tick_interval.as_millis() as u64).max(1)
    }

    #[allow(clippy::cast_possible_truncation)]
    fn step_ms(&self) -> u64 {
        (self.countdown_step.as_millis() as u64).max(1)
    }
}

/// Why a run was aborted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AbortReason {
    /// The user ended the session early
    EndedByUser,
    /// The user hit the emergency stop
    EmergencyStop,
}

/// Where the run is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "status")]
pub enum RunStatus {
    /// Waiting for the user to start
    Idle,
    /// Start requested, disclaimer not yet accepted
    AwaitingDisclaimer,
    /// Counting down to the first breath
    Countdown {
        /// Steps left, shown to the user
        remaining: u32,
    },
    /// Rounds in progress (possibly paused)
    Running,
    /// All rounds finished
    Completed,
    /// Stopped before finishing
    Aborted {
        /// What stopped it
        reason: AbortReason,
    },
}

/// Ephemeral state of the run in progress.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionRunState {
    /// Zero-based round in progress
    pub current_round: u32,
    /// Target rounds, never below `current_round + 1` while running
    pub total_rounds: u32,
    /// Active phase
    pub phase: Phase,
    /// Position within the current round's cycle (0.0 - 1.0)
    pub phase_progress_fraction: f64,
    /// Whether the phase timer is frozen
    pub is_paused: bool,
}

impl SessionRunState {
    fn initial(total_rounds: u32) -> Self {
        Self {
            current_round: 0,
            total_rounds: total_rounds.max(1),
            phase: Phase::Inhale,
            phase_progress_fraction: 0.0,
            is_paused: false,
        }
    }
}

/// Result of asking to start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartOutcome {
    /// Countdown began
    CountdownStarted,
    /// The disclaimer must be accepted first
    DisclaimerRequired,
    /// Start is not possible from the current status
    Ignored,
}

/// Something that happened during a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickEvent {
    /// Countdown moved to the given step
    CountdownStep(u32),
    /// Countdown ended and the first round began
    Started,
    /// A new phase began
    PhaseChanged(Phase),
    /// A round finished; carries the number of rounds done so far
    RoundCompleted(u32),
    /// The final round finished
    Completed,
}

/// Severity of a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    /// Informational
    Info,
    /// Something failed but the exercise continues
    Warning,
}

/// Transient, non-fatal message for the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    /// Message text
    pub message: String,
    /// Severity
    pub level: NoticeLevel,
}

impl Notice {
    fn warning(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            level: NoticeLevel::Warning,
        }
    }

    fn info(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            level: NoticeLevel::Info,
        }
    }
}

/// Outcome of a completed run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompletionSummary {
    /// Session id, if the start was recorded
    pub session_id: Option<i64>,
    /// Rounds finished
    pub rounds_completed: u32,
    /// Wall-clock seconds since the session started, pauses included
    pub duration_seconds_elapsed: i64,
}

/// State machine for a single exercise run.
pub struct SessionMachine<L: SessionLifecycle> {
    exercise: ExerciseDefinition,
    timing: TimingSettings,
    lifecycle: L,
    status: RunStatus,
    state: SessionRunState,
    cycle_elapsed_ms: u64,
    countdown_elapsed_ms: u64,
    session_id: Option<i64>,
    started_at: Option<DateTime<Utc>>,
    summary: Option<CompletionSummary>,
    notices: Vec<Notice>,
}

impl<L: SessionLifecycle> SessionMachine<L> {
    /// Create a machine for an exercise.
    ///
    /// # Errors
    ///
    /// Returns `BreatheError::InvalidExercise` if the definition is invalid.
    pub fn new(
        exercise: ExerciseDefinition,
        timing: TimingSettings,
        lifecycle: L,
    ) -> Result<Self, BreatheError> {
        exercise.validate()?;
        let state = SessionRunState::initial(exercise.default_rounds);

        Ok(Self {
            exercise,
            timing,
            lifecycle,
            status: RunStatus::Idle,
            state,
            cycle_elapsed_ms: 0,
            countdown_elapsed_ms: 0,
            session_id: None,
            started_at: None,
            summary: None,
            notices: Vec::new(),
        })
    }

    /// Create a machine for an exercise looked up by id.
    ///
    /// # Errors
    ///
    /// Returns `BreatheError::NotFound` if the catalog has no such exercise.
    pub fn from_catalog(
        catalog: &Catalog,
        exercise_id: &str,
        timing: TimingSettings,
        lifecycle: L,
    ) -> Result<Self, BreatheError> {
        let exercise = catalog.require(exercise_id)?.clone();
        Self::new(exercise, timing, lifecycle)
    }

    /// Request a start.
    ///
    /// Without accepted consent the machine waits for
    /// [`accept_disclaimer`](Self::accept_disclaimer).
    pub fn start(&mut self, consent: &ConsentGate) -> StartOutcome {
        if self.status != RunStatus::Idle {
            return StartOutcome::Ignored;
        }

        if consent.is_accepted() {
            self.enter_countdown();
            StartOutcome::CountdownStarted
        } else {
            self.status = RunStatus::AwaitingDisclaimer;
            StartOutcome::DisclaimerRequired
        }
    }

    /// Accept the disclaimer and go straight into the countdown.
    pub fn accept_disclaimer(&mut self, consent: &mut ConsentGate) -> bool {
        if self.status != RunStatus::AwaitingDisclaimer {
            return false;
        }
        consent.accept();
        self.enter_countdown();
        true
    }

    /// Decline the disclaimer and return to idle.
    pub fn decline_disclaimer(&mut self) -> bool {
        if self.status != RunStatus::AwaitingDisclaimer {
            return false;
        }
        self.status = RunStatus::Idle;
        true
    }

    fn enter_countdown(&mut self) {
        let steps = self.timing.countdown_steps.max(1);
        debug!(exercise = %self.exercise.id, steps, "countdown started");
        self.countdown_elapsed_ms = 0;
        self.status = RunStatus::Countdown { remaining: steps };
    }

    /// Advance the active timer by one tick.
    ///
    /// `now` is the wall-clock time of this tick, used for the session
    /// start instant and the elapsed time reported at completion.
    pub fn tick(&mut self, now: DateTime<Utc>) -> Vec<TickEvent> {
        match self.status {
            RunStatus::Countdown { remaining } => self.tick_countdown(remaining, now),
            RunStatus::Running if !self.state.is_paused => self.tick_running(now),
            _ => Vec::new(),
        }
    }

    fn tick_countdown(&mut self, remaining: u32, now: DateTime<Utc>) -> Vec<TickEvent> {
        self.countdown_elapsed_ms += self.timing.tick_ms();
        if self.countdown_elapsed_ms < self.timing.step_ms() {
            return Vec::new();
        }

        self.countdown_elapsed_ms = 0;
        let remaining = remaining.saturating_sub(1);
        if remaining > 0 {
            self.status = RunStatus::Countdown { remaining };
            return vec![TickEvent::CountdownStep(remaining)];
        }

        self.begin_running(now);
        vec![TickEvent::Started, TickEvent::PhaseChanged(Phase::Inhale)]
    }

    fn begin_running(&mut self, now: DateTime<Utc>) {
        self.started_at = Some(now);
        self.cycle_elapsed_ms = 0;
        self.state.current_round = 0;
        self.state.phase = Phase::Inhale;
        self.state.phase_progress_fraction = 0.0;
        self.state.is_paused = false;
        self.status = RunStatus::Running;

        match self
            .lifecycle
            .start_session(&self.exercise.id, self.state.total_rounds)
        {
            Ok(started) => {
                info!(
                    session_id = started.session_id,
                    exercise = %self.exercise.id,
                    rounds = self.state.total_rounds,
                    "session started"
                );
                self.session_id = Some(started.session_id);
            }
            Err(e) => {
                warn!(error = %e, exercise = %self.exercise.id, "failed to record session start");
                self.notices.push(Notice::warning(format!(
                    "Could not save the session start ({e}). The exercise continues."
                )));
            }
        }
    }

    #[allow(clippy::cast_precision_loss)]
    fn tick_running(&mut self, now: DateTime<Utc>) -> Vec<TickEvent> {
        let mut events = Vec::new();
        let cycle_ms = self.exercise.pattern.cycle_millis();
        let before = self.state.phase;

        self.cycle_elapsed_ms += self.timing.tick_ms();

        if self.cycle_elapsed_ms >= cycle_ms {
            self.cycle_elapsed_ms = 0;
            self.state.current_round += 1;
            events.push(TickEvent::RoundCompleted(self.state.current_round));
            debug!(round = self.state.current_round, total = self.state.total_rounds, "round completed");

            if self.state.current_round >= self.state.total_rounds {
                self.state.phase_progress_fraction = 1.0;
                self.finish(now);
                events.push(TickEvent::Completed);
                return events;
            }
        }

        self.state.phase = self.exercise.pattern.phase_at_millis(self.cycle_elapsed_ms);
        self.state.phase_progress_fraction = self.cycle_elapsed_ms as f64 / cycle_ms as f64;

        if self.state.phase != before {
            events.push(TickEvent::PhaseChanged(self.state.phase));
        }
        events
    }

    fn finish(&mut self, now: DateTime<Utc>) {
        self.status = RunStatus::Completed;

        let rounds_completed = self.state.total_rounds;
        let duration_seconds_elapsed = self
            .started_at
            .map_or(0, |started| now.signed_duration_since(started).num_seconds().max(0));

        match self.session_id {
            Some(id) => {
                match self
                    .lifecycle
                    .complete_session(id, rounds_completed, duration_seconds_elapsed)
                {
                    Ok(()) => info!(
                        session_id = id,
                        rounds_completed,
                        duration_seconds_elapsed,
                        "session completed"
                    ),
                    Err(e) => {
                        warn!(error = %e, session_id = id, "failed to record session completion");
                        self.notices.push(Notice::warning(format!(
                            "Could not save your completed session ({e})."
                        )));
                    }
                }
            }
            None => {
                self.notices.push(Notice::warning(
                    "Session finished, but it was never recorded so it won't count toward your streak.",
                ));
            }
        }

        self.summary = Some(CompletionSummary {
            session_id: self.session_id,
            rounds_completed,
            duration_seconds_elapsed,
        });
    }

    /// Toggle pause while running. Returns the new paused flag.
    pub fn toggle_pause(&mut self) -> bool {
        if self.status == RunStatus::Running {
            self.state.is_paused = !self.state.is_paused;
            debug!(paused = self.state.is_paused, "pause toggled");
        }
        self.state.is_paused
    }

    /// Set the target rounds, clamped to at least `current_round + 1`.
    ///
    /// Returns the value applied. Ignored once the run has ended.
    pub fn set_total_rounds(&mut self, rounds: u32) -> u32 {
        let adjustable = matches!(
            self.status,
            RunStatus::Idle
                | RunStatus::AwaitingDisclaimer
                | RunStatus::Countdown { .. }
                | RunStatus::Running
        );
        if adjustable {
            let minimum = self.state.current_round + 1;
            self.state.total_rounds = rounds.max(minimum);
        }
        self.state.total_rounds
    }

    /// Add one round to the target.
    pub fn add_round(&mut self) -> u32 {
        self.set_total_rounds(self.state.total_rounds.saturating_add(1))
    }

    /// Remove one round from the target, within the clamp.
    pub fn remove_round(&mut self) -> u32 {
        self.set_total_rounds(self.state.total_rounds.saturating_sub(1))
    }

    /// End the session early. No completion is recorded.
    pub fn end_session(&mut self) -> bool {
        self.abort(AbortReason::EndedByUser)
    }

    /// Stop immediately. No completion is recorded.
    pub fn emergency_stop(&mut self) -> bool {
        self.abort(AbortReason::EmergencyStop)
    }

    fn abort(&mut self, reason: AbortReason) -> bool {
        if !matches!(self.status, RunStatus::Countdown { .. } | RunStatus::Running) {
            return false;
        }

        info!(
            ?reason,
            round = self.state.current_round,
            total = self.state.total_rounds,
            "session aborted"
        );
        self.status = RunStatus::Aborted { reason };
        self.discard_run(self.state.total_rounds);
        if reason == AbortReason::EmergencyStop {
            self.notices.push(Notice::info(
                "Exercise stopped. Breathe normally and take a moment before getting up.",
            ));
        }
        true
    }

    /// Reset after completion or abort, keeping the chosen round count.
    pub fn restart(&mut self) -> bool {
        if !matches!(self.status, RunStatus::Completed | RunStatus::Aborted { .. }) {
            return false;
        }
        self.discard_run(self.state.total_rounds);
        self.summary = None;
        self.status = RunStatus::Idle;
        true
    }

    fn discard_run(&mut self, total_rounds: u32) {
        self.state = SessionRunState::initial(total_rounds);
        self.cycle_elapsed_ms = 0;
        self.countdown_elapsed_ms = 0;
        self.session_id = None;
        self.started_at = None;
    }

    /// Take all pending notices.
    pub fn drain_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    /// Seconds left in the current phase, rounded up.
    #[must_use]
    pub fn phase_seconds_remaining(&self) -> u64 {
        let mut boundary = 0u64;
        for (phase, secs) in self.exercise.pattern.phases() {
            boundary += u64::from(secs) * 1000;
            if phase == self.state.phase && self.cycle_elapsed_ms < boundary {
                return (boundary - self.cycle_elapsed_ms).div_ceil(1000);
            }
        }
        0
    }

    /// Current lifecycle status.
    #[must_use]
    pub const fn status(&self) -> RunStatus {
        self.status
    }

    /// Current run state.
    #[must_use]
    pub const fn state(&self) -> &SessionRunState {
        &self.state
    }

    /// The exercise being run.
    #[must_use]
    pub const fn exercise(&self) -> &ExerciseDefinition {
        &self.exercise
    }

    /// Timing in use.
    #[must_use]
    pub const fn timing(&self) -> &TimingSettings {
        &self.timing
    }

    /// Recorded session id, once the start succeeded.
    #[must_use]
    pub const fn session_id(&self) -> Option<i64> {
        self.session_id
    }

    /// Summary of the last completed run.
    #[must_use]
    pub const fn summary(&self) -> Option<&CompletionSummary> {
        self.summary.as_ref()
    }

    /// Whether the phase timer is active (running and not paused).
    #[must_use]
    pub fn is_breathing(&self) -> bool {
        self.status == RunStatus::Running && !self.state.is_paused
    }
}
