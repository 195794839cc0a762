//! Exercise session storage.
//!
//! Persists exercise sessions to the local database and serves them back as
//! the session lifecycle and history collaborators.

use chrono::{DateTime, Duration, Utc};
use rusqlite::{params, OptionalExtension, Row};
use tracing::debug;

use super::lifecycle::{HistoryWindow, SessionHistory, SessionLifecycle, StartedSession};
use super::record::{ExerciseSessionRecord, Timestamp};
use crate::error::BreatheError;
use crate::storage::Database;

const SELECT_COLUMNS: &str = r"SELECT id, exercise_id, rounds, rounds_completed,
       duration_seconds_elapsed, completed, started_at, completed_at
  FROM exercise_sessions";

/// Storage for exercise sessions.
pub struct SessionStorage {
    db: Database,
}

impl SessionStorage {
    /// Open storage at the default database location.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened.
    pub fn new() -> Result<Self, BreatheError> {
        let db = Database::open()?;
        Ok(Self { db })
    }

    /// Create storage with an existing database connection.
    #[must_use]
    pub const fn with_database(db: Database) -> Self {
        Self { db }
    }

    /// Record a session start at `now`.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn start_at(
        &self,
        exercise_id: &str,
        requested_rounds: u32,
        now: DateTime<Utc>,
    ) -> Result<StartedSession, BreatheError> {
        let conn = self.db.connection();

        conn.execute(
            r"INSERT INTO exercise_sessions (exercise_id, rounds, completed, started_at)
              VALUES (?1, ?2, 0, ?3)",
            params![exercise_id, requested_rounds, now.to_rfc3339()],
        )
        .map_err(|e| BreatheError::Database(format!("Failed to insert session: {e}")))?;

        let session_id = conn.last_insert_rowid();
        debug!(session_id, exercise_id, "session row inserted");

        Ok(StartedSession {
            session_id,
            started_at: now,
        })
    }

    /// Mark a session completed at `now`.
    ///
    /// # Errors
    ///
    /// Returns `BreatheError::NotFound` if no in-progress session has this id.
    pub fn complete_at(
        &self,
        session_id: i64,
        rounds_completed: u32,
        duration_seconds_elapsed: i64,
        now: DateTime<Utc>,
    ) -> Result<(), BreatheError> {
        let rows = self
            .db
            .connection()
            .execute(
                r"UPDATE exercise_sessions SET
                  rounds_completed = ?1,
                  duration_seconds_elapsed = ?2,
                  completed = 1,
                  completed_at = ?3
                  WHERE id = ?4 AND completed = 0",
                params![
                    rounds_completed,
                    duration_seconds_elapsed,
                    now.to_rfc3339(),
                    session_id
                ],
            )
            .map_err(|e| BreatheError::Database(format!("Failed to complete session: {e}")))?;

        if rows == 0 {
            return Err(BreatheError::NotFound(format!(
                "In-progress session {session_id}"
            )));
        }
        Ok(())
    }

    /// Get a session by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get(&self, id: i64) -> Result<Option<ExerciseSessionRecord>, BreatheError> {
        let conn = self.db.connection();

        let mut stmt = conn
            .prepare(&format!("{SELECT_COLUMNS} WHERE id = ?1"))
            .map_err(|e| BreatheError::Database(format!("Failed to prepare query: {e}")))?;

        let record = stmt
            .query_row([id], row_to_record)
            .optional()
            .map_err(|e| BreatheError::Database(format!("Failed to query session: {e}")))?;

        Ok(record)
    }

    /// Most recent sessions of any state, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn recent(&self, limit: usize) -> Result<Vec<ExerciseSessionRecord>, BreatheError> {
        self.query(
            &format!("{SELECT_COLUMNS} ORDER BY started_at DESC, id DESC LIMIT ?1"),
            [sql_limit(Some(limit))],
        )
    }

    /// Sessions that started before `now - older_than` and never completed.
    ///
    /// These are left behind when a completion call failed or the app was
    /// closed mid-run. They are reported, never modified.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn orphaned(
        &self,
        now: DateTime<Utc>,
        older_than: Duration,
    ) -> Result<Vec<ExerciseSessionRecord>, BreatheError> {
        let cutoff = (now - older_than).to_rfc3339();
        self.query(
            &format!(
                "{SELECT_COLUMNS} WHERE completed = 0 AND started_at < ?1 ORDER BY started_at DESC"
            ),
            [cutoff],
        )
    }

    fn query<P: rusqlite::Params>(
        &self,
        sql: &str,
        params: P,
    ) -> Result<Vec<ExerciseSessionRecord>, BreatheError> {
        let conn = self.db.connection();

        let mut stmt = conn
            .prepare(sql)
            .map_err(|e| BreatheError::Database(format!("Failed to prepare query: {e}")))?;

        let rows = stmt
            .query_map(params, row_to_record)
            .map_err(|e| BreatheError::Database(format!("Failed to query sessions: {e}")))?;

        let mut records = Vec::new();
        for row in rows {
            records.push(row.map_err(|e| BreatheError::Database(e.to_string()))?);
        }
        Ok(records)
    }

    /// Insert a row verbatim, bypassing validation.
    #[cfg(test)]
    pub(crate) fn insert_raw(
        &self,
        exercise_id: &str,
        completed: bool,
        started_at: &str,
        completed_at: Option<&str>,
    ) -> Result<i64, BreatheError> {
        let conn = self.db.connection();
        conn.execute(
            r"INSERT INTO exercise_sessions
              (exercise_id, rounds, rounds_completed, duration_seconds_elapsed, completed, started_at, completed_at)
              VALUES (?1, 4, ?2, ?3, ?4, ?5, ?6)",
            params![
                exercise_id,
                completed.then_some(4),
                completed.then_some(60),
                completed,
                started_at,
                completed_at
            ],
        )?;
        Ok(conn.last_insert_rowid())
    }
}

impl SessionLifecycle for SessionStorage {
    fn start_session(
        &mut self,
        exercise_id: &str,
        requested_rounds: u32,
    ) -> Result<StartedSession, BreatheError> {
        self.start_at(exercise_id, requested_rounds, Utc::now())
    }

    fn complete_session(
        &mut self,
        session_id: i64,
        rounds_completed: u32,
        duration_seconds_elapsed: i64,
    ) -> Result<(), BreatheError> {
        self.complete_at(session_id, rounds_completed, duration_seconds_elapsed, Utc::now())
    }
}

impl SessionHistory for SessionStorage {
    fn list_completed_sessions(
        &self,
        window: HistoryWindow,
    ) -> Result<Vec<ExerciseSessionRecord>, BreatheError> {
        let limit = match window {
            HistoryWindow::Unbounded => None,
            HistoryWindow::MostRecent(n) => Some(n),
        };
        self.query(
            &format!(
                "{SELECT_COLUMNS} WHERE completed = 1 ORDER BY completed_at DESC, id DESC LIMIT ?1"
            ),
            [sql_limit(limit)],
        )
    }
}

/// SQLite treats a negative LIMIT as "no limit".
fn sql_limit(limit: Option<usize>) -> i64 {
    limit.map_or(-1, |n| i64::try_from(n).unwrap_or(i64::MAX))
}

/// Convert a database row to a session record.
fn row_to_record(row: &Row<'_>) -> Result<ExerciseSessionRecord, rusqlite::Error> {
    let started_at: String = row.get(6)?;
    let completed_at: Option<String> = row.get(7)?;

    Ok(ExerciseSessionRecord {
        id: row.get(0)?,
        exercise_id: row.get(1)?,
        rounds: row.get(2)?,
        rounds_completed: row.get(3)?,
        duration_seconds_elapsed: row.get(4)?,
        completed: row.get(5)?,
        started_at: Timestamp::from_raw(started_at),
        completed_at: completed_at.map(Timestamp::from_raw),
    })
}
