//! `SQLite` database connection.
//!
//! The database lives at `~/.breathe/breathe.db` and holds the exercise
//! session history.

use std::path::Path;

use rusqlite::Connection;
use tracing::debug;

use crate::config::Paths;
use crate::error::BreatheError;

use super::migrations;

/// Database connection wrapper.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open the database at the default location.
    ///
    /// Creates the database file and runs migrations if necessary.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or migrations fail.
    pub fn open() -> Result<Self, BreatheError> {
        let paths = Paths::new()?;
        paths.ensure_dirs()?;
        Self::open_at(&paths.database)
    }

    /// Open the database at a specific path.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or migrations fail.
    pub fn open_at(path: &Path) -> Result<Self, BreatheError> {
        debug!(path = %path.display(), "opening database");
        let conn = Connection::open(path).map_err(|e| {
            BreatheError::Database(format!("Failed to open database {}: {e}", path.display()))
        })?;
        Self::init(conn)
    }

    /// Open an in-memory database (useful for testing).
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or migrations fail.
    pub fn open_in_memory() -> Result<Self, BreatheError> {
        let conn = Connection::open_in_memory().map_err(|e| {
            BreatheError::Database(format!("Failed to open in-memory database: {e}"))
        })?;
        Self::init(conn)
    }

    fn init(conn: Connection) -> Result<Self, BreatheError> {
        conn.execute_batch("PRAGMA foreign_keys = ON;")
            .map_err(|e| BreatheError::Database(format!("Failed to enable foreign keys: {e}")))?;

        migrations::run(&conn)?;
        Ok(Self { conn })
    }

    /// Get the current schema version.
    ///
    /// # Errors
    ///
    /// Returns an error if the version cannot be read.
    pub fn schema_version(&self) -> Result<i32, BreatheError> {
        migrations::get_version(&self.conn)
    }

    /// Get a reference to the underlying connection.
    #[must_use]
    pub const fn connection(&self) -> &Connection {
        &self.conn
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_in_memory() {
        let db = Database::open_in_memory().unwrap();
        assert!(db.schema_version().unwrap() > 0);
    }

    #[test]
    fn test_reopen_file() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let db_path = temp_dir.path().join("test.db");

        {
            let db = Database::open_at(&db_path).unwrap();
            db.connection()
                .execute(
                    "INSERT INTO exercise_sessions (exercise_id, rounds, started_at)
                     VALUES ('box', 4, '2024-01-01T10:00:00+00:00')",
                    [],
                )
                .unwrap();
        }

        let db = Database::open_at(&db_path).unwrap();
        let count: i64 = db
            .connection()
            .query_row("SELECT COUNT(*) FROM exercise_sessions", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 1);
        assert!(db_path.exists());
    }
}
