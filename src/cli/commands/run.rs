//! Interactive exercise run.

use colored::Colorize;
use tracing::info;

use crate::cli::args::{OutputFormat, RunArgs};
use crate::config::Config;
use crate::error::BreatheError;
use crate::features::exercise::Catalog;
use crate::features::session::{
    CompletionSummary, ConsentGate, SessionLifecycle, SessionMachine, SessionStorage,
};
use crate::output::{format_duration, to_json};
use crate::tui;

/// Execute run command
///
/// The exercise id is resolved before the terminal is taken over, so an
/// unknown id fails without showing the countdown.
///
/// # Errors
///
/// Returns `BreatheError::NotFound` for an unknown exercise, or an error if
/// the database or terminal cannot be set up.
pub fn run(
    config: &Config,
    catalog: &Catalog,
    args: &RunArgs,
    format: OutputFormat,
) -> Result<String, BreatheError> {
    catalog.require(&args.id)?;
    let machine = prepare(config, catalog, args, SessionStorage::new()?)?;
    let consent = ConsentGate::new(args.accept_disclaimer || !config.exercise.require_disclaimer);

    let exercise_name = machine.exercise().name.clone();
    let summary = tui::run(machine, consent)?;
    info!(completed = summary.is_some(), "exercise view closed");

    report(&exercise_name, summary.as_ref(), format)
}

/// Build the state machine for a run.
///
/// # Errors
///
/// Returns `BreatheError::NotFound` for an unknown exercise.
pub fn prepare<L: SessionLifecycle>(
    config: &Config,
    catalog: &Catalog,
    args: &RunArgs,
    lifecycle: L,
) -> Result<SessionMachine<L>, BreatheError> {
    let mut machine =
        SessionMachine::from_catalog(catalog, &args.id, config.exercise.timing(), lifecycle)?;
    if let Some(rounds) = args.rounds {
        machine.set_total_rounds(rounds);
    }
    Ok(machine)
}

fn report(
    exercise_name: &str,
    summary: Option<&CompletionSummary>,
    format: OutputFormat,
) -> Result<String, BreatheError> {
    match format {
        OutputFormat::Json => to_json(&summary),
        OutputFormat::Pretty => Ok(summary.map_or_else(String::new, |s| {
            let duration = format_duration(s.duration_seconds_elapsed.max(0).unsigned_abs());
            let mut line = format!(
                "{} {} rounds of {} in {}",
                "Completed".green().bold(),
                s.rounds_completed,
                exercise_name,
                duration
            );
            if s.session_id.is_none() {
                line.push_str(&format!("\n{}", "This session was not saved.".yellow()));
            }
            line
        })),
    }
}
