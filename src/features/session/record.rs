//! Persisted exercise session records.

use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};

/// A timestamp in its persisted text form.
///
/// Records come from storage as text; a value that does not parse as
/// RFC 3339 is kept as-is so readers can decide to skip it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(String);

impl Timestamp {
    /// Wrap a raw persisted value.
    #[must_use]
    pub fn from_raw(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// The raw text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parse as a UTC instant, `None` if malformed.
    #[must_use]
    pub fn parse(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(self.0.trim())
            .ok()
            .map(|t| t.with_timezone(&Utc))
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(t: DateTime<Utc>) -> Self {
        Self(t.to_rfc3339())
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One run of an exercise, as stored by the session collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExerciseSessionRecord {
    /// Database ID
    pub id: i64,
    /// Exercise that was run
    pub exercise_id: String,
    /// Rounds requested at start
    pub rounds: u32,
    /// Rounds finished, set on completion
    pub rounds_completed: Option<u32>,
    /// Wall-clock seconds from start to completion
    pub duration_seconds_elapsed: Option<i64>,
    /// Whether the completion transition fired
    pub completed: bool,
    /// When the session started
    pub started_at: Timestamp,
    /// When the session completed
    pub completed_at: Option<Timestamp>,
}

impl ExerciseSessionRecord {
    /// Completion instant, if completed and the timestamp parses.
    #[must_use]
    pub fn completed_instant(&self) -> Option<DateTime<Utc>> {
        if !self.completed {
            return None;
        }
        self.completed_at.as_ref().and_then(Timestamp::parse)
    }

    /// Start time in the local timezone, if it parses.
    #[must_use]
    pub fn started_at_local(&self) -> Option<DateTime<Local>> {
        self.started_at.parse().map(|t| t.with_timezone(&Local))
    }
}
