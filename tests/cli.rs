use assert_cmd::Command;
use chrono::Utc;
use predicates::prelude::*;
use tempfile::TempDir;

use breathe::features::session::SessionStorage;
use breathe::storage::Database;

fn breathe(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("breathe").unwrap();
    cmd.env("BREATHE_HOME", home.path())
        .env_remove("RUST_LOG")
        .env("NO_COLOR", "1");
    cmd
}

fn record_completed_session(home: &TempDir, exercise_id: &str) {
    let db = Database::open_at(&home.path().join("breathe.db")).unwrap();
    let storage = SessionStorage::with_database(db);
    let now = Utc::now();
    let started = storage.start_at(exercise_id, 4, now).unwrap();
    storage.complete_at(started.session_id, 4, 64, now).unwrap();
}

#[test]
fn list_shows_builtin_exercises() {
    let home = TempDir::new().unwrap();
    breathe(&home)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("box"))
        .stdout(predicate::str::contains("relaxing-478"));
}

#[test]
fn list_json() {
    let home = TempDir::new().unwrap();
    breathe(&home)
        .args(["list", "-o", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"count\": 6"))
        .stdout(predicate::str::contains("\"notation\": \"4-4-4-4\""));
}

#[test]
fn show_exercise_timeline() {
    let home = TempDir::new().unwrap();
    breathe(&home)
        .args(["show", "box"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Inhale"))
        .stdout(predicate::str::contains("16s per round"));
}

#[test]
fn recommend_for_mood() {
    let home = TempDir::new().unwrap();
    breathe(&home)
        .args(["recommend", "anxious"])
        .assert()
        .success()
        .stdout(predicate::str::contains("breathe run relaxing-478"));
}

#[test]
fn unknown_exercise_fails() {
    let home = TempDir::new().unwrap();
    breathe(&home)
        .args(["show", "nope"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("error"))
        .stderr(predicate::str::contains("nope"));
}

#[test]
fn run_unknown_exercise_fails_before_countdown() {
    let home = TempDir::new().unwrap();
    breathe(&home)
        .args(["run", "nope", "--accept-disclaimer"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn streak_empty_history() {
    let home = TempDir::new().unwrap();
    breathe(&home)
        .args(["streak", "-o", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"current_streak\": 0"))
        .stdout(predicate::str::contains("\"longest_streak\": 0"));
}

#[test]
fn streak_counts_todays_session() {
    let home = TempDir::new().unwrap();
    record_completed_session(&home, "box");

    breathe(&home)
        .args(["streak", "-o", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"current_streak\": 1"));
}

#[test]
fn history_lists_sessions() {
    let home = TempDir::new().unwrap();
    breathe(&home)
        .arg("history")
        .assert()
        .success()
        .stdout(predicate::str::contains("No sessions"));

    record_completed_session(&home, "coherent");

    breathe(&home)
        .args(["history", "-o", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"count\": 1"))
        .stdout(predicate::str::contains("\"coherent\""));
}

#[test]
fn stats_with_custom_config() {
    let home = TempDir::new().unwrap();
    std::fs::write(
        home.path().join("config.yaml"),
        "general:\n  default_output: json\ncustom_exercises:\n  - id: square-6\n    name: Six Square\n    pattern: 6-6-6-6\n",
    )
    .unwrap();
    record_completed_session(&home, "square-6");

    breathe(&home)
        .arg("stats")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"favorite_exercise\": \"square-6\""));

    breathe(&home)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"count\": 7"));
}

#[test]
fn invalid_config_fails() {
    let home = TempDir::new().unwrap();
    std::fs::write(
        home.path().join("config.yaml"),
        "custom_exercises:\n  - id: broken\n    name: Broken\n    pattern: 0-4-4-0\n",
    )
    .unwrap();

    breathe(&home)
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("configuration error"));
}

#[test]
fn completions_zsh() {
    let home = TempDir::new().unwrap();
    breathe(&home)
        .args(["completions", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#compdef breathe"));
}
