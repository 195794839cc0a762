//! Output formatting for breathe.
//!
//! This module provides formatters for displaying exercises, history and
//! statistics in various formats.

mod json;
mod pretty;

use crate::cli::args::OutputFormat;
use crate::error::BreatheError;
use crate::features::exercise::{ExerciseDefinition, Mood};
use crate::features::session::ExerciseSessionRecord;
use crate::features::stats::{PracticeSummary, StreakResult};

pub use json::*;
pub use pretty::*;

/// Format the exercise catalog based on output format
///
/// # Errors
///
/// Returns `BreatheError::Parse` if JSON serialization fails.
pub fn format_exercises(
    exercises: &[&ExerciseDefinition],
    format: OutputFormat,
) -> Result<String, BreatheError> {
    match format {
        OutputFormat::Pretty => Ok(format_exercises_pretty(exercises)),
        OutputFormat::Json => format_exercises_json(exercises),
    }
}

/// Format a single exercise based on output format
///
/// # Errors
///
/// Returns `BreatheError::Parse` if JSON serialization fails.
pub fn format_exercise(
    exercise: &ExerciseDefinition,
    format: OutputFormat,
) -> Result<String, BreatheError> {
    match format {
        OutputFormat::Pretty => Ok(format_exercise_pretty(exercise)),
        OutputFormat::Json => format_exercise_json(exercise),
    }
}

/// Format mood recommendations based on output format
///
/// # Errors
///
/// Returns `BreatheError::Parse` if JSON serialization fails.
pub fn format_recommendations(
    mood: Mood,
    exercises: &[&ExerciseDefinition],
    format: OutputFormat,
) -> Result<String, BreatheError> {
    match format {
        OutputFormat::Pretty => Ok(format_recommendations_pretty(mood, exercises)),
        OutputFormat::Json => format_recommendations_json(mood, exercises),
    }
}

/// Format session history based on output format
///
/// # Errors
///
/// Returns `BreatheError::Parse` if JSON serialization fails.
pub fn format_history(
    records: &[ExerciseSessionRecord],
    title: &str,
    format: OutputFormat,
) -> Result<String, BreatheError> {
    match format {
        OutputFormat::Pretty => Ok(format_history_pretty(records, title)),
        OutputFormat::Json => format_history_json(records, title),
    }
}

/// Format streaks based on output format
///
/// # Errors
///
/// Returns `BreatheError::Parse` if JSON serialization fails.
pub fn format_streak(
    streak: &StreakResult,
    days_since_practice: Option<i64>,
    format: OutputFormat,
) -> Result<String, BreatheError> {
    match format {
        OutputFormat::Pretty => Ok(format_streak_pretty(streak, days_since_practice)),
        OutputFormat::Json => format_streak_json(streak, days_since_practice),
    }
}

/// Format the practice summary based on output format
///
/// # Errors
///
/// Returns `BreatheError::Parse` if JSON serialization fails.
pub fn format_summary(summary: &PracticeSummary, format: OutputFormat) -> Result<String, BreatheError> {
    match format {
        OutputFormat::Pretty => Ok(format_summary_pretty(summary)),
        OutputFormat::Json => to_json(summary),
    }
}
