//! Shell completions generation.

use clap::CommandFactory;
use clap_complete::Shell;

use crate::cli::args::Cli;
use crate::error::BreatheError;

/// Generate the completion script for a shell.
///
/// # Errors
///
/// Returns `BreatheError::Parse` if the generated script is not UTF-8.
pub fn completions(shell: Shell) -> Result<String, BreatheError> {
    let mut cmd = Cli::command();
    let mut buf = Vec::new();
    clap_complete::generate(shell, &mut cmd, "breathe", &mut buf);
    String::from_utf8(buf).map_err(|e| BreatheError::Parse(format!("UTF-8 error: {e}")))
}
