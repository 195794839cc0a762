//! Exercise catalog commands.

use crate::cli::args::OutputFormat;
use crate::error::BreatheError;
use crate::features::exercise::{recommend, Catalog, Mood};
use crate::output::{format_exercise, format_exercises, format_recommendations};

/// Execute list command
///
/// # Errors
///
/// Returns an error if output formatting fails.
pub fn list(catalog: &Catalog, format: OutputFormat) -> Result<String, BreatheError> {
    let exercises: Vec<_> = catalog.iter().collect();
    format_exercises(&exercises, format)
}

/// Execute show command
///
/// # Errors
///
/// Returns `BreatheError::NotFound` for an unknown id.
pub fn show(catalog: &Catalog, id: &str, format: OutputFormat) -> Result<String, BreatheError> {
    let exercise = catalog.require(id)?;
    format_exercise(exercise, format)
}

/// Execute recommend command
///
/// # Errors
///
/// Returns an error if output formatting fails.
pub fn recommend_for(
    catalog: &Catalog,
    mood: Mood,
    format: OutputFormat,
) -> Result<String, BreatheError> {
    let picks = recommend(catalog, mood);
    format_recommendations(mood, &picks, format)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_show_unknown_exercise() {
        let err = show(&Catalog::builtin(), "nope", OutputFormat::Pretty).unwrap_err();
        assert!(matches!(err, BreatheError::NotFound(_)));
    }

    #[test]
    fn test_recommend_json_lists_ids() {
        let output = recommend_for(&Catalog::builtin(), Mood::Sleepless, OutputFormat::Json).unwrap();
        assert!(output.contains("\"relaxing-478\""));
        assert!(output.contains("\"deep-calm\""));
    }
}
