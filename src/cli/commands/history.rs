//! Session history command.

use chrono::{DateTime, Duration, Utc};

use crate::cli::args::{HistoryArgs, OutputFormat};
use crate::error::BreatheError;
use crate::features::session::SessionStorage;
use crate::output::format_history;

/// A session still unfinished after this long is reported as orphaned.
const ORPHAN_AFTER_HOURS: i64 = 1;

/// Execute history command
///
/// # Errors
///
/// Returns an error if the query or output formatting fails.
pub fn history(
    storage: &SessionStorage,
    args: &HistoryArgs,
    now: DateTime<Utc>,
    format: OutputFormat,
) -> Result<String, BreatheError> {
    if args.orphaned {
        let mut records = storage.orphaned(now, Duration::hours(ORPHAN_AFTER_HOURS))?;
        records.truncate(args.limit);
        return format_history(&records, "Orphaned sessions", format);
    }

    let records = storage.recent(args.limit)?;
    format_history(&records, "History", format)
}
