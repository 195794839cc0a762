//! Practice statistics.
//!
//! - Current and longest streaks over calendar days
//! - Achievements unlocked from history
//! - Aggregate practice summary

pub mod achievements;
pub mod streak;
pub mod summary;

pub use achievements::{evaluate, Achievement};
pub use streak::{practice_days, DayBoundary, StreakResult};
pub use summary::PracticeSummary;
