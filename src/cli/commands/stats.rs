//! Streak and statistics commands.

use chrono::{DateTime, Utc};

use crate::cli::args::OutputFormat;
use crate::config::StatsConfig;
use crate::error::BreatheError;
use crate::features::session::SessionHistory;
use crate::features::stats::{PracticeSummary, StreakResult};
use crate::output::{format_streak, format_summary};

/// Execute streak command
///
/// # Errors
///
/// Returns an error if the history cannot be read or output formatting fails.
pub fn streak<H: SessionHistory>(
    history: &H,
    settings: &StatsConfig,
    now: DateTime<Utc>,
    format: OutputFormat,
) -> Result<String, BreatheError> {
    let records = history.list_completed_sessions(settings.window())?;
    let result = StreakResult::calculate(&records, now, settings.day_boundary);
    let days_since = result.days_since_practice(now, settings.day_boundary);
    format_streak(&result, days_since, format)
}

/// Execute stats command
///
/// # Errors
///
/// Returns an error if the history cannot be read or output formatting fails.
pub fn stats<H: SessionHistory>(
    history: &H,
    settings: &StatsConfig,
    now: DateTime<Utc>,
    format: OutputFormat,
) -> Result<String, BreatheError> {
    let records = history.list_completed_sessions(settings.window())?;
    let summary = PracticeSummary::calculate(&records, now, settings.day_boundary);
    format_summary(&summary, format)
}
