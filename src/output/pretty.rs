use colored::Colorize;

use crate::features::exercise::{ExerciseDefinition, Mood};
use crate::features::session::ExerciseSessionRecord;
use crate::features::stats::{PracticeSummary, StreakResult};

/// Format seconds as `1h 02m`, `3m 04s` or `42s`.
#[must_use]
pub fn format_duration(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;

    if hours > 0 {
        format!("{hours}h {minutes:02}m")
    } else if minutes > 0 {
        format!("{minutes}m {secs:02}s")
    } else {
        format!("{secs}s")
    }
}

fn estimated(exercise: &ExerciseDefinition) -> String {
    let seconds = exercise
        .estimated_duration(exercise.default_rounds)
        .num_seconds()
        .max(0)
        .unsigned_abs();
    format_duration(seconds)
}

fn exercise_line(exercise: &ExerciseDefinition) -> String {
    format!(
        "{:<14} {:<26} {:<9} {} rounds  ~{}",
        exercise.id.cyan(),
        exercise.name.bold(),
        exercise.pattern.notation().yellow(),
        exercise.default_rounds,
        estimated(exercise).dimmed()
    )
}

/// Format the exercise catalog as a table
#[must_use]
pub fn format_exercises_pretty(exercises: &[&ExerciseDefinition]) -> String {
    if exercises.is_empty() {
        return "Exercises (0 items)\n  No exercises".to_string();
    }

    let mut output = format!("Exercises ({} items)\n", exercises.len());
    output.push_str(&"─".repeat(72));
    output.push('\n');

    for exercise in exercises {
        output.push_str(&exercise_line(exercise));
        output.push('\n');
    }

    output
}

/// Format one exercise with its phase timeline
#[must_use]
pub fn format_exercise_pretty(exercise: &ExerciseDefinition) -> String {
    let mut output = format!("{} ({})\n", exercise.name.bold(), exercise.id.cyan());
    if !exercise.description.is_empty() {
        output.push_str(&format!("  {}\n", exercise.description));
    }
    output.push('\n');

    output.push_str(&format!(
        "  Pattern: {}  ({}s per round)\n",
        exercise.pattern.notation().yellow(),
        exercise.pattern.cycle_seconds()
    ));

    for (phase, secs) in exercise.pattern.phases() {
        output.push_str(&format!(
            "    {:<12} {:>3}s  {}\n",
            phase.display_name(),
            secs,
            "█".repeat(secs as usize).green()
        ));
    }

    output.push_str(&format!(
        "  Rounds:  {} (~{})\n",
        exercise.default_rounds,
        estimated(exercise)
    ));

    if !exercise.moods.is_empty() {
        let moods = exercise
            .moods
            .iter()
            .map(Mood::display_name)
            .collect::<Vec<_>>()
            .join(", ");
        output.push_str(&format!("  Good for: {moods}\n"));
    }

    output
}

/// Format mood recommendations
#[must_use]
pub fn format_recommendations_pretty(mood: Mood, exercises: &[&ExerciseDefinition]) -> String {
    let mut output = format!("Feeling {}? Try:\n", mood.display_name().to_lowercase().bold());
    output.push_str(&"─".repeat(72));
    output.push('\n');

    for (i, exercise) in exercises.iter().enumerate() {
        output.push_str(&format!("{}. {}\n", i + 1, exercise_line(exercise)));
    }

    if let Some(first) = exercises.first() {
        output.push_str(&format!(
            "\nStart with: {}",
            format!("breathe run {}", first.id).green()
        ));
    }

    output
}

/// Format session history as a table
#[must_use]
pub fn format_history_pretty(records: &[ExerciseSessionRecord], title: &str) -> String {
    if records.is_empty() {
        return format!("{title} (0 items)\n  No sessions");
    }

    let mut output = format!("{} ({} items)\n", title, records.len());
    output.push_str(&"─".repeat(60));
    output.push('\n');

    for record in records {
        let icon = if record.completed {
            "[x]".green()
        } else {
            "[ ]".white()
        };

        let when = record.started_at_local().map_or_else(
            || record.started_at.to_string(),
            |t| t.format("%Y-%m-%d %H:%M").to_string(),
        );

        let rounds = record.rounds_completed.map_or_else(
            || format!("{} rounds", record.rounds),
            |done| format!("{done}/{} rounds", record.rounds),
        );

        let mut line = format!(
            "{} {}  {}  {}",
            icon,
            when.dimmed(),
            record.exercise_id.bold(),
            rounds
        );

        if let Some(secs) = record.duration_seconds_elapsed {
            line.push_str(&format!("  {}", format_duration(secs.max(0).unsigned_abs()).yellow()));
        }

        output.push_str(&line);
        output.push('\n');
    }

    output
}

/// Format current and longest streak
#[must_use]
pub fn format_streak_pretty(streak: &StreakResult, days_since_practice: Option<i64>) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "Current streak: {}\n",
        day_count(streak.current_streak).green().bold()
    ));
    output.push_str(&format!(
        "Longest streak: {}\n",
        day_count(streak.longest_streak).cyan()
    ));

    match (streak.last_practice, days_since_practice) {
        (Some(last), Some(0)) => {
            output.push_str(&format!("Last practice:  {last} (today)"));
        }
        (Some(last), Some(1)) => {
            output.push_str(&format!("Last practice:  {last} (yesterday)\n"));
            output.push_str(&"Practice today to keep going.".yellow().to_string());
        }
        (Some(last), Some(days)) => {
            output.push_str(&format!("Last practice:  {last} ({days} days ago)"));
        }
        (Some(last), None) => {
            output.push_str(&format!("Last practice:  {last}"));
        }
        (None, _) => {
            output.push_str(&"No completed sessions yet.".dimmed().to_string());
        }
    }

    output
}

fn day_count(days: u32) -> String {
    if days == 1 {
        "1 day".to_string()
    } else {
        format!("{days} days")
    }
}

/// Format practice totals and achievements
#[must_use]
pub fn format_summary_pretty(summary: &PracticeSummary) -> String {
    let mut output = Vec::new();

    output.push("PRACTICE".bold().to_string());
    output.push("─".repeat(50));
    output.push(format!(
        "  Sessions: {}  Rounds: {}  Time: {}",
        summary.total_sessions.to_string().cyan(),
        summary.total_rounds.to_string().cyan(),
        format_duration(summary.total_seconds).cyan()
    ));
    output.push(format!(
        "  Streak: {} current, {} longest",
        day_count(summary.streak.current_streak).green(),
        day_count(summary.streak.longest_streak)
    ));
    if let Some(favorite) = &summary.favorite_exercise {
        output.push(format!("  Favorite: {}", favorite.bold()));
    }
    output.push(String::new());

    output.push(format!(
        "{} ({}/{})",
        "ACHIEVEMENTS".bold(),
        summary.unlocked_count(),
        summary.achievements.len()
    ));
    output.push("─".repeat(50));
    for achievement in &summary.achievements {
        if achievement.unlocked {
            output.push(format!(
                "  {} {}  {}",
                "★".yellow(),
                achievement.title.bold(),
                achievement.description.dimmed()
            ));
        } else {
            output.push(format!(
                "  {} {}  {} ({}/{})",
                "☆".dimmed(),
                achievement.title,
                achievement.description.dimmed(),
                achievement.progress,
                achievement.target
            ));
        }
    }

    output.join("\n")
}
