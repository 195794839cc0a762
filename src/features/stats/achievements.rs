//! Practice achievements.
//!
//! Milestones unlocked from session history: the first session, streak
//! lengths, session counts and total practice time.

use serde::{Deserialize, Serialize};

use crate::features::session::ExerciseSessionRecord;

use super::streak::StreakResult;

/// An unlockable milestone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Achievement {
    /// Stable identifier
    pub id: String,
    /// Short title
    pub title: String,
    /// What it takes to unlock
    pub description: String,
    /// Whether the milestone has been reached
    pub unlocked: bool,
    /// Progress toward the target
    pub progress: u64,
    /// Value needed to unlock
    pub target: u64,
}

impl Achievement {
    fn new(id: &str, title: &str, description: &str, progress: u64, target: u64) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            description: description.to_string(),
            unlocked: progress >= target,
            progress: progress.min(target),
            target,
        }
    }

    /// Progress as a fraction in `[0, 1]`.
    #[must_use]
    pub fn fraction(&self) -> f64 {
        if self.target == 0 {
            return 1.0;
        }
        self.progress as f64 / self.target as f64
    }
}

/// Totals over completed sessions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Totals {
    sessions: u64,
    rounds: u64,
    seconds: u64,
}

impl Totals {
    fn from_records(records: &[ExerciseSessionRecord]) -> Self {
        records
            .iter()
            .filter(|r| r.completed)
            .fold(Self::default(), |mut acc, r| {
                acc.sessions += 1;
                acc.rounds += u64::from(r.rounds_completed.unwrap_or(0));
                acc.seconds += r.duration_seconds_elapsed.unwrap_or(0).max(0).unsigned_abs();
                acc
            })
    }
}

/// Evaluate every achievement against the history and streaks.
pub fn evaluate(records: &[ExerciseSessionRecord], streak: &StreakResult) -> Vec<Achievement> {
    let totals = Totals::from_records(records);
    let longest = u64::from(streak.longest_streak);

    let mut achievements = Vec::new();
    achievements.extend(session_achievements(totals));
    achievements.extend(streak_achievements(longest));
    achievements.extend(volume_achievements(totals));
    achievements
}

fn session_achievements(totals: Totals) -> Vec<Achievement> {
    vec![
        Achievement::new(
            "first-breath",
            "First Breath",
            "Complete your first session",
            totals.sessions,
            1,
        ),
        Achievement::new(
            "regular",
            "Regular",
            "Complete 10 sessions",
            totals.sessions,
            10,
        ),
        Achievement::new(
            "devoted",
            "Devoted",
            "Complete 50 sessions",
            totals.sessions,
            50,
        ),
    ]
}

fn streak_achievements(longest: u64) -> Vec<Achievement> {
    [
        ("streak-3", "Warming Up", 3),
        ("streak-7", "One Week", 7),
        ("streak-30", "Steady Breather", 30),
    ]
    .into_iter()
    .map(|(id, title, days)| {
        Achievement::new(
            id,
            title,
            &format!("Practice {days} days in a row"),
            longest,
            days,
        )
    })
    .collect()
}

fn volume_achievements(totals: Totals) -> Vec<Achievement> {
    vec![
        Achievement::new(
            "hundred-rounds",
            "Hundred Rounds",
            "Complete 100 rounds in total",
            totals.rounds,
            100,
        ),
        Achievement::new(
            "hour",
            "Full Hour",
            "Practice for 60 minutes in total",
            totals.seconds,
            3600,
        ),
    ]
}
