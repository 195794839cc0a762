//! Database migrations.
//!
//! Each migration upgrades the schema by one version, tracked in
//! `PRAGMA user_version`. Migrations run when the database is opened.

use rusqlite::Connection;
use tracing::info;

use crate::error::BreatheError;

/// Current schema version.
const CURRENT_VERSION: i32 = 1;

/// Get the current schema version, 0 for a new database.
pub fn get_version(conn: &Connection) -> Result<i32, BreatheError> {
    conn.query_row("PRAGMA user_version", [], |row| row.get(0))
        .map_err(|e| BreatheError::Database(format!("Failed to get schema version: {e}")))
}

fn set_version(conn: &Connection, version: i32) -> Result<(), BreatheError> {
    conn.execute_batch(&format!("PRAGMA user_version = {version};"))
        .map_err(|e| BreatheError::Database(format!("Failed to set schema version: {e}")))
}

/// Run all pending migrations.
pub fn run(conn: &Connection) -> Result<(), BreatheError> {
    let current = get_version(conn)?;

    for version in (current + 1)..=CURRENT_VERSION {
        info!(version, "applying database migration");
        run_migration(conn, version)?;
        set_version(conn, version)?;
    }

    Ok(())
}

fn run_migration(conn: &Connection, version: i32) -> Result<(), BreatheError> {
    match version {
        1 => migrate_v1(conn),
        _ => Err(BreatheError::Database(format!(
            "Unknown migration version: {version}"
        ))),
    }
}

/// Migration v1: exercise session history.
fn migrate_v1(conn: &Connection) -> Result<(), BreatheError> {
    conn.execute_batch(
        r"
        CREATE TABLE IF NOT EXISTS exercise_sessions (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            exercise_id TEXT NOT NULL,
            rounds INTEGER NOT NULL,
            rounds_completed INTEGER,
            duration_seconds_elapsed INTEGER,
            completed INTEGER NOT NULL DEFAULT 0,
            started_at TEXT NOT NULL,
            completed_at TEXT
        );

        CREATE INDEX IF NOT EXISTS idx_exercise_sessions_started
        ON exercise_sessions(started_at);

        CREATE INDEX IF NOT EXISTS idx_exercise_sessions_completed
        ON exercise_sessions(completed, completed_at);
        ",
    )
    .map_err(|e| BreatheError::Database(format!("Migration v1 failed: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_migration_v1() {
        let conn = Connection::open_in_memory().unwrap();
        run(&conn).unwrap();
        assert_eq!(get_version(&conn).unwrap(), CURRENT_VERSION);

        conn.execute(
            "INSERT INTO exercise_sessions (exercise_id, rounds, started_at)
             VALUES ('box', 4, '2024-01-01T10:00:00+00:00')",
            [],
        )
        .unwrap();

        let completed: bool = conn
            .query_row("SELECT completed FROM exercise_sessions", [], |row| row.get(0))
            .unwrap();
        assert!(!completed);
    }

    #[test]
    fn test_migration_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        run(&conn).unwrap();
        run(&conn).unwrap();
        assert_eq!(get_version(&conn).unwrap(), CURRENT_VERSION);
    }

    #[test]
    fn test_get_version_new_database() {
        let conn = Connection::open_in_memory().unwrap();
        assert_eq!(get_version(&conn).unwrap(), 0);
    }
}
