//! Logging initialization.
//!
//! Verbosity comes from the `-v` count unless `RUST_LOG` is set. While an
//! exercise is running the terminal belongs to the TUI, so logs go to a
//! file instead of stderr.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use tracing::{debug, trace};
use tracing_subscriber::EnvFilter;

use crate::error::BreatheError;

/// Filter directive for a `-v` count.
#[must_use]
pub const fn log_level(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

fn env_filter(verbose: u8) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level(verbose)))
}

/// Install the global subscriber.
///
/// With `log_file` set, output is appended to that file without colors.
///
/// # Errors
///
/// Returns an error if the log file cannot be opened or a subscriber is
/// already installed.
pub fn init_logging(verbose: u8, log_file: Option<&Path>) -> Result<(), BreatheError> {
    let installed = match log_file {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            tracing_subscriber::fmt()
                .with_env_filter(env_filter(verbose))
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .with_target(true)
                .try_init()
        }
        None => tracing_subscriber::fmt()
            .with_env_filter(env_filter(verbose))
            .with_writer(std::io::stderr)
            .with_target(verbose >= 2)
            .with_line_number(verbose >= 3)
            .try_init(),
    };

    installed.map_err(|e| BreatheError::Config(format!("Failed to initialize logging: {e}")))?;

    debug!(verbose, "logging initialized");
    trace!(args = ?std::env::args().collect::<Vec<_>>(), "command line");
    Ok(())
}
