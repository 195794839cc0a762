//! Practice streak calculation.
//!
//! A streak counts consecutive calendar days with at least one completed
//! session. Every timestamp, including "today", is turned into a calendar
//! day with the same [`DayBoundary`], so the current and longest streak can
//! never disagree about which day a session belongs to.

use std::collections::BTreeSet;

use chrono::{DateTime, Local, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::features::session::ExerciseSessionRecord;

/// Where one calendar day ends and the next begins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayBoundary {
    /// Midnight in the system's local timezone
    #[default]
    Local,
    /// Midnight UTC
    Utc,
}

impl DayBoundary {
    /// Calendar day containing an instant.
    #[must_use]
    pub fn day_of(&self, instant: DateTime<Utc>) -> NaiveDate {
        match self {
            Self::Local => instant.with_timezone(&Local).date_naive(),
            Self::Utc => instant.date_naive(),
        }
    }
}

/// Current and all-time streaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StreakResult {
    /// Consecutive days with practice, ending today
    pub current_streak: u32,
    /// Longest run of consecutive practice days ever
    pub longest_streak: u32,
    /// Most recent practice day
    pub last_practice: Option<NaiveDate>,
}

impl StreakResult {
    /// Calculate streaks from session records.
    ///
    /// Only completed sessions with a completion time count. Records whose
    /// completion time cannot be parsed are skipped. The current streak
    /// requires practice today; a day without practice resets it to zero.
    #[must_use]
    pub fn calculate(
        records: &[ExerciseSessionRecord],
        now: DateTime<Utc>,
        boundary: DayBoundary,
    ) -> Self {
        let days = practice_days(records, boundary);
        if days.is_empty() {
            return Self::default();
        }

        let today = boundary.day_of(now);
        let current = current_run(&days, today);
        let longest = longest_run(&days).max(current);

        debug!(current, longest, days = days.len(), %today, "streak calculated");

        Self {
            current_streak: current,
            longest_streak: longest,
            last_practice: days.iter().next_back().copied(),
        }
    }

    /// Whole days since the last practice day, `None` without any practice.
    #[must_use]
    pub fn days_since_practice(&self, now: DateTime<Utc>, boundary: DayBoundary) -> Option<i64> {
        self.last_practice
            .map(|last| (boundary.day_of(now) - last).num_days().max(0))
    }
}

/// Unique calendar days with a completed session.
#[must_use]
pub fn practice_days(records: &[ExerciseSessionRecord], boundary: DayBoundary) -> BTreeSet<NaiveDate> {
    let mut days = BTreeSet::new();

    for record in records.iter().filter(|r| r.completed) {
        let Some(raw) = record.completed_at.as_ref() else {
            debug!(session_id = record.id, "completed session has no completion time");
            continue;
        };

        match raw.parse() {
            Some(instant) => {
                days.insert(boundary.day_of(instant));
            }
            None => warn!(
                session_id = record.id,
                completed_at = raw.as_str(),
                "skipping session with malformed completion time"
            ),
        }
    }

    days
}

fn current_run(days: &BTreeSet<NaiveDate>, today: NaiveDate) -> u32 {
    let mut run = 0;
    let mut check = today;

    while days.contains(&check) {
        run += 1;
        match check.pred_opt() {
            Some(previous) => check = previous,
            None => break,
        }
    }

    run
}

fn longest_run(days: &BTreeSet<NaiveDate>) -> u32 {
    let mut longest = 0;
    let mut run = 0;
    let mut prev: Option<NaiveDate> = None;

    for day in days {
        run = match prev {
            Some(p) if (*day - p).num_days() == 1 => run + 1,
            _ => 1,
        };
        longest = longest.max(run);
        prev = Some(*day);
    }

    longest
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::session::Timestamp;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 10, 12, 0, 0).unwrap()
    }

    fn completed(id: i64, at: DateTime<Utc>) -> ExerciseSessionRecord {
        completed_raw(id, &at.to_rfc3339())
    }

    fn completed_raw(id: i64, completed_at: &str) -> ExerciseSessionRecord {
        ExerciseSessionRecord {
            id,
            exercise_id: "box".to_string(),
            rounds: 4,
            rounds_completed: Some(4),
            duration_seconds_elapsed: Some(64),
            completed: true,
            started_at: Timestamp::from_raw(completed_at),
            completed_at: Some(Timestamp::from_raw(completed_at)),
        }
    }

    fn days_ago(id: i64, days: i64) -> ExerciseSessionRecord {
        completed(id, now() - Duration::days(days))
    }

    fn calc(records: &[ExerciseSessionRecord]) -> StreakResult {
        StreakResult::calculate(records, now(), DayBoundary::Utc)
    }

    #[test]
    fn test_empty_history() {
        let result = calc(&[]);
        assert_eq!(result.current_streak, 0);
        assert_eq!(result.longest_streak, 0);
        assert!(result.last_practice.is_none());
    }

    #[test]
    fn test_today_and_yesterday() {
        let result = calc(&[days_ago(1, 0), days_ago(2, 1)]);
        assert_eq!(result.current_streak, 2);
        assert_eq!(result.longest_streak, 2);
    }

    #[test]
    fn test_gap_resets_current() {
        let result = calc(&[days_ago(1, 0), days_ago(2, 3)]);
        assert_eq!(result.current_streak, 1);
        assert_eq!(result.longest_streak, 1);
    }

    #[test]
    fn test_historical_run_without_recent_practice() {
        let records: Vec<_> = (10..15).map(|d| days_ago(d, d)).collect();
        let result = calc(&records);
        assert_eq!(result.current_streak, 0);
        assert_eq!(result.longest_streak, 5);
        assert_eq!(result.last_practice, Some(NaiveDate::from_ymd_opt(2024, 5, 31).unwrap()));
    }

    #[test]
    fn test_single_session() {
        let today = calc(&[days_ago(1, 0)]);
        assert_eq!((today.current_streak, today.longest_streak), (1, 1));

        let yesterday = calc(&[days_ago(1, 1)]);
        assert_eq!((yesterday.current_streak, yesterday.longest_streak), (0, 1));
    }

    #[test]
    fn test_same_day_sessions_count_once() {
        let morning = Utc.with_ymd_and_hms(2024, 6, 10, 7, 0, 0).unwrap();
        let evening = Utc.with_ymd_and_hms(2024, 6, 10, 11, 30, 0).unwrap();
        let records = vec![
            completed(1, morning),
            completed(2, evening),
            completed(3, morning + Duration::minutes(5)),
            days_ago(4, 1),
        ];

        let result = calc(&records);
        assert_eq!(result.current_streak, 2);
        assert_eq!(result.longest_streak, 2);
    }

    #[test]
    fn test_malformed_and_incomplete_records_skipped() {
        let mut in_progress = days_ago(3, 1);
        in_progress.completed = false;
        let mut missing_time = days_ago(4, 1);
        missing_time.completed_at = None;

        let records = vec![
            days_ago(1, 0),
            completed_raw(2, "not-a-timestamp"),
            in_progress,
            missing_time,
        ];

        let result = calc(&records);
        assert_eq!(result.current_streak, 1);
        assert_eq!(result.longest_streak, 1);
    }

    #[test]
    fn test_longest_survives_broken_streak() {
        let mut records: Vec<_> = (20..27).map(|d| days_ago(d, d)).collect();
        records.extend((0..3).map(|d| days_ago(100 + d, d)));

        let result = calc(&records);
        assert_eq!(result.current_streak, 3);
        assert_eq!(result.longest_streak, 7);
    }

    #[test]
    fn test_utc_boundary_near_midnight() {
        let late = Utc.with_ymd_and_hms(2024, 6, 9, 23, 50, 0).unwrap();
        let early = Utc.with_ymd_and_hms(2024, 6, 10, 0, 10, 0).unwrap();

        let result = calc(&[completed(1, late), completed(2, early)]);
        assert_eq!(result.current_streak, 2);
    }

    #[test]
    fn test_local_boundary_uses_same_policy_for_today() {
        let at = Utc::now();
        let result = StreakResult::calculate(&[completed(1, at)], at, DayBoundary::Local);
        assert_eq!(result.current_streak, 1);
        assert_eq!(result.last_practice, Some(at.with_timezone(&Local).date_naive()));
    }

    #[test]
    fn test_all_histories_over_ten_days() {
        // Every subset of the last ten days: longest >= current, and current
        // equals the number of trailing practice days ending today.
        for mask in 0u32..1024 {
            let records: Vec<_> = (0..10)
                .filter(|d| mask & (1 << d) != 0)
                .map(|d| days_ago(i64::from(d), i64::from(d)))
                .collect();

            let result = calc(&records);
            let expected_current = mask.trailing_ones();

            assert!(result.longest_streak >= result.current_streak, "mask {mask:#b}");
            assert_eq!(result.current_streak, expected_current, "mask {mask:#b}");
            assert_eq!(result.longest_streak == 0, mask == 0, "mask {mask:#b}");
        }
    }

    #[test]
    fn test_days_since_practice() {
        let result = calc(&[days_ago(1, 4)]);
        assert_eq!(result.days_since_practice(now(), DayBoundary::Utc), Some(4));
        assert_eq!(calc(&[]).days_since_practice(now(), DayBoundary::Utc), None);
    }
}
