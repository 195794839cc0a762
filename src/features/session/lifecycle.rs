//! Interfaces to the session collaborators.
//!
//! The state machine records sessions through [`SessionLifecycle`] and the
//! streak calculator reads them through [`SessionHistory`]. Both are
//! implemented by `SessionStorage` for the local database.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::record::ExerciseSessionRecord;
use crate::error::BreatheError;

/// Result of registering a session start.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StartedSession {
    /// Identifier to complete the session with
    pub session_id: i64,
    /// Start time as recorded by the collaborator
    pub started_at: DateTime<Utc>,
}

/// Start/complete calls issued by the exercise state machine.
#[cfg_attr(test, mockall::automock)]
pub trait SessionLifecycle {
    /// Register a new session. Called once per run, when the countdown ends.
    ///
    /// # Errors
    ///
    /// Returns an error if the session could not be recorded.
    fn start_session(
        &mut self,
        exercise_id: &str,
        requested_rounds: u32,
    ) -> Result<StartedSession, BreatheError>;

    /// Mark a session completed. Called once per run, only on natural completion.
    ///
    /// # Errors
    ///
    /// Returns an error if the session could not be updated.
    fn complete_session(
        &mut self,
        session_id: i64,
        rounds_completed: u32,
        duration_seconds_elapsed: i64,
    ) -> Result<(), BreatheError>;
}

/// How much history to read for streaks and stats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HistoryWindow {
    /// Every completed session
    #[default]
    Unbounded,
    /// Only the most recent N completed sessions.
    ///
    /// Streaks longer than the window cannot be seen.
    MostRecent(usize),
}

impl HistoryWindow {
    /// Window from an optional record limit.
    #[must_use]
    pub const fn from_limit(limit: Option<usize>) -> Self {
        match limit {
            Some(n) => Self::MostRecent(n),
            None => Self::Unbounded,
        }
    }
}

/// Read access to completed sessions.
#[cfg_attr(test, mockall::automock)]
pub trait SessionHistory {
    /// Completed sessions, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the history could not be read.
    fn list_completed_sessions(
        &self,
        window: HistoryWindow,
    ) -> Result<Vec<ExerciseSessionRecord>, BreatheError>;
}

/// Whether the user accepted the safety disclaimer for this run of the app.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConsentGate {
    accepted: bool,
}

impl ConsentGate {
    /// Create a gate with the given acceptance.
    #[must_use]
    pub const fn new(accepted: bool) -> Self {
        Self { accepted }
    }

    /// Whether the disclaimer has been accepted.
    #[must_use]
    pub const fn is_accepted(&self) -> bool {
        self.accepted
    }

    /// Record acceptance.
    pub fn accept(&mut self) {
        self.accepted = true;
    }
}

/// Safety disclaimer shown before the first exercise.
pub const DISCLAIMER: &str = "Breathing exercises can cause light-headedness. \
Stop immediately if you feel dizzy or unwell. These exercises are not a \
substitute for medical advice; if you have a respiratory or heart condition, \
or are pregnant, check with a doctor first.";
