//! JSON output formatting for breathe.

use serde::Serialize;
use serde_json::json;

use crate::error::BreatheError;
use crate::features::exercise::{ExerciseDefinition, Mood};
use crate::features::session::ExerciseSessionRecord;
use crate::features::stats::StreakResult;

/// Format exercises as JSON
///
/// # Errors
///
/// Returns `BreatheError::Parse` if JSON serialization fails.
pub fn format_exercises_json(exercises: &[&ExerciseDefinition]) -> Result<String, BreatheError> {
    let items: Vec<_> = exercises.iter().map(|e| exercise_value(e)).collect();
    let output = json!({
        "count": exercises.len(),
        "items": items
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Format a single exercise as JSON
///
/// # Errors
///
/// Returns `BreatheError::Parse` if JSON serialization fails.
pub fn format_exercise_json(exercise: &ExerciseDefinition) -> Result<String, BreatheError> {
    Ok(serde_json::to_string_pretty(&exercise_value(exercise))?)
}

/// Format mood recommendations as JSON
///
/// # Errors
///
/// Returns `BreatheError::Parse` if JSON serialization fails.
pub fn format_recommendations_json(
    mood: Mood,
    exercises: &[&ExerciseDefinition],
) -> Result<String, BreatheError> {
    let items: Vec<_> = exercises.iter().map(|e| exercise_value(e)).collect();
    let output = json!({
        "mood": mood,
        "count": exercises.len(),
        "items": items
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Format session history as JSON
///
/// # Errors
///
/// Returns `BreatheError::Parse` if JSON serialization fails.
pub fn format_history_json(
    records: &[ExerciseSessionRecord],
    title: &str,
) -> Result<String, BreatheError> {
    let output = json!({
        "list": title,
        "count": records.len(),
        "items": records
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Format streaks as JSON
///
/// # Errors
///
/// Returns `BreatheError::Parse` if JSON serialization fails.
pub fn format_streak_json(
    streak: &StreakResult,
    days_since_practice: Option<i64>,
) -> Result<String, BreatheError> {
    let output = json!({
        "current_streak": streak.current_streak,
        "longest_streak": streak.longest_streak,
        "last_practice": streak.last_practice,
        "days_since_practice": days_since_practice
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Generic JSON formatter for any serializable type
///
/// # Errors
///
/// Returns `BreatheError::Parse` if JSON serialization fails.
pub fn to_json<T: Serialize>(value: &T) -> Result<String, BreatheError> {
    Ok(serde_json::to_string_pretty(value)?)
}

fn exercise_value(exercise: &ExerciseDefinition) -> serde_json::Value {
    json!({
        "id": exercise.id,
        "name": exercise.name,
        "description": exercise.description,
        "pattern": exercise.pattern,
        "notation": exercise.pattern.notation(),
        "cycle_seconds": exercise.pattern.cycle_seconds(),
        "default_rounds": exercise.default_rounds,
        "estimated_seconds": exercise.estimated_duration(exercise.default_rounds).num_seconds(),
        "moods": exercise.moods
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::exercise::Catalog;
    use crate::features::session::Timestamp;
    use chrono::NaiveDate;

    #[test]
    fn test_format_exercises_json() {
        let catalog = Catalog::builtin();
        let exercises: Vec<_> = catalog.iter().collect();
        let result = format_exercises_json(&exercises).unwrap();

        assert!(result.contains(&format!("\"count\": {}", catalog.len())));
        assert!(result.contains("\"id\": \"box\""));
        assert!(result.contains("\"notation\": \"4-4-4-4\""));
    }

    #[test]
    fn test_format_exercise_json() {
        let catalog = Catalog::builtin();
        let result = format_exercise_json(catalog.require("box").unwrap()).unwrap();

        assert!(result.contains("\"cycle_seconds\": 16"));
        assert!(result.contains("\"estimated_seconds\": 64"));
        assert!(result.contains("\"stressed\""));
    }

    #[test]
    fn test_format_recommendations_json() {
        let catalog = Catalog::builtin();
        let picks = crate::features::exercise::recommend(&catalog, Mood::Tired);
        let result = format_recommendations_json(Mood::Tired, &picks).unwrap();

        assert!(result.contains("\"mood\": \"tired\""));
        assert!(result.contains("\"energize\""));
    }

    #[test]
    fn test_format_history_json_empty() {
        let result = format_history_json(&[], "History").unwrap();
        assert!(result.contains("\"count\": 0"));
        assert!(result.contains("\"items\": []"));
    }

    #[test]
    fn test_format_history_json_keeps_raw_timestamps() {
        let record = ExerciseSessionRecord {
            id: 7,
            exercise_id: "calm".to_string(),
            rounds: 6,
            rounds_completed: None,
            duration_seconds_elapsed: None,
            completed: false,
            started_at: Timestamp::from_raw("garbled"),
            completed_at: None,
        };
        let result = format_history_json(&[record], "Orphaned").unwrap();

        assert!(result.contains("\"started_at\": \"garbled\""));
        assert!(result.contains("\"completed_at\": null"));
    }

    #[test]
    fn test_format_streak_json() {
        let streak = StreakResult {
            current_streak: 3,
            longest_streak: 9,
            last_practice: NaiveDate::from_ymd_opt(2024, 6, 10),
        };
        let result = format_streak_json(&streak, Some(0)).unwrap();

        assert!(result.contains("\"current_streak\": 3"));
        assert!(result.contains("\"longest_streak\": 9"));
        assert!(result.contains("\"last_practice\": \"2024-06-10\""));
        assert!(result.contains("\"days_since_practice\": 0"));
    }
}
