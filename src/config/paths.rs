//! Path resolution for breathe configuration and data files.
//!
//! All breathe data is stored in `~/.breathe/` (or `$BREATHE_HOME`):
//! - `config.yaml` - Main configuration file
//! - `breathe.db` - SQLite database with session history
//! - `breathe.log` - Log output while an exercise is running

use std::path::PathBuf;

use crate::error::BreatheError;

/// Environment variable overriding the data root.
pub const HOME_ENV: &str = "BREATHE_HOME";

/// Paths to breathe configuration and data files.
#[derive(Debug, Clone)]
pub struct Paths {
    /// Root directory: `~/.breathe/`
    pub root: PathBuf,
    /// Config file: `~/.breathe/config.yaml`
    pub config_file: PathBuf,
    /// Database file: `~/.breathe/breathe.db`
    pub database: PathBuf,
    /// Log file: `~/.breathe/breathe.log`
    pub log_file: PathBuf,
}

impl Paths {
    /// Resolve paths from `$BREATHE_HOME`, falling back to `$HOME/.breathe`.
    ///
    /// # Errors
    ///
    /// Returns an error if neither variable is set.
    pub fn new() -> Result<Self, BreatheError> {
        if let Some(root) = std::env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
            return Ok(Self::with_root(PathBuf::from(root)));
        }

        let home = std::env::var("HOME").map_err(|_| {
            BreatheError::Config("Could not determine home directory".to_string())
        })?;

        Ok(Self::with_root(PathBuf::from(home).join(".breathe")))
    }

    /// Create paths with a custom root directory.
    #[must_use]
    pub fn with_root(root: PathBuf) -> Self {
        Self {
            config_file: root.join("config.yaml"),
            database: root.join("breathe.db"),
            log_file: root.join("breathe.log"),
            root,
        }
    }

    /// Ensure the root directory exists.
    ///
    /// # Errors
    ///
    /// Returns an error if directory creation fails.
    pub fn ensure_dirs(&self) -> Result<(), BreatheError> {
        if !self.root.exists() {
            std::fs::create_dir_all(&self.root).map_err(|e| {
                BreatheError::Config(format!(
                    "Failed to create directory {}: {e}",
                    self.root.display()
                ))
            })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_paths_with_root() {
        let root = PathBuf::from("/tmp/test-breathe");
        let paths = Paths::with_root(root.clone());

        assert_eq!(paths.root, root);
        assert_eq!(paths.config_file, root.join("config.yaml"));
        assert_eq!(paths.database, root.join("breathe.db"));
        assert_eq!(paths.log_file, root.join("breathe.log"));
    }

    #[test]
    fn test_ensure_dirs() {
        let temp_dir = TempDir::new().unwrap();
        let paths = Paths::with_root(temp_dir.path().join("nested").join(".breathe"));

        paths.ensure_dirs().unwrap();
        assert!(paths.root.is_dir());

        // Second call is a no-op
        paths.ensure_dirs().unwrap();
    }
}
