//! Practice summary across the whole history.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::features::session::ExerciseSessionRecord;

use super::achievements::{evaluate, Achievement};
use super::streak::{DayBoundary, StreakResult};

/// Aggregate practice numbers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PracticeSummary {
    /// Completed sessions
    pub total_sessions: u64,
    /// Rounds across completed sessions
    pub total_rounds: u64,
    /// Seconds across completed sessions
    pub total_seconds: u64,
    /// Most practiced exercise, ties broken alphabetically
    pub favorite_exercise: Option<String>,
    /// Streaks
    pub streak: StreakResult,
    /// Achievement progress
    pub achievements: Vec<Achievement>,
}

impl PracticeSummary {
    /// Summarize completed sessions.
    #[must_use]
    pub fn calculate(
        records: &[ExerciseSessionRecord],
        now: DateTime<Utc>,
        boundary: DayBoundary,
    ) -> Self {
        let completed: Vec<&ExerciseSessionRecord> =
            records.iter().filter(|r| r.completed).collect();

        let total_rounds = completed
            .iter()
            .map(|r| u64::from(r.rounds_completed.unwrap_or(0)))
            .sum();
        let total_seconds = completed
            .iter()
            .map(|r| r.duration_seconds_elapsed.unwrap_or(0).max(0).unsigned_abs())
            .sum();

        let streak = StreakResult::calculate(records, now, boundary);

        Self {
            total_sessions: completed.len() as u64,
            total_rounds,
            total_seconds,
            favorite_exercise: favorite(&completed),
            achievements: evaluate(records, &streak),
            streak,
        }
    }

    /// Number of unlocked achievements.
    #[must_use]
    pub fn unlocked_count(&self) -> usize {
        self.achievements.iter().filter(|a| a.unlocked).count()
    }
}

fn favorite(completed: &[&ExerciseSessionRecord]) -> Option<String> {
    let mut counts: HashMap<&str, u64> = HashMap::new();
    for record in completed {
        *counts.entry(record.exercise_id.as_str()).or_default() += 1;
    }

    counts
        .into_iter()
        .max_by(|(a_id, a_count), (b_id, b_count)| a_count.cmp(b_count).then(b_id.cmp(a_id)))
        .map(|(id, _)| id.to_string())
}
