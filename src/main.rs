use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
use colored::Colorize;
use tracing::debug;

use breathe::cli::args::{Cli, Commands};
use breathe::cli::commands;
use breathe::config::{ColorSetting, Config, Paths};
use breathe::features::session::SessionStorage;
use breathe::logging::init_logging;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {:#}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let paths = Paths::new()?;

    // The exercise view owns the terminal, so its logs go to a file.
    let log_file = if matches!(cli.command, Commands::Run(_)) {
        paths.ensure_dirs()?;
        Some(paths.log_file.as_path())
    } else {
        None
    };
    init_logging(cli.verbose, log_file)?;

    let config = Config::load_from_path(&paths.config_file)?;
    match config.general.color {
        ColorSetting::Always => colored::control::set_override(true),
        ColorSetting::Never => colored::control::set_override(false),
        ColorSetting::Auto => {}
    }

    let format = cli.output.unwrap_or(config.general.default_output);
    let catalog = config.catalog()?;
    let now = Utc::now();
    debug!(?format, exercises = catalog.len(), "configuration loaded");

    let output = match cli.command {
        Commands::List => commands::list(&catalog, format)?,
        Commands::Show { id } => commands::show(&catalog, &id, format)?,
        Commands::Recommend { mood } => commands::recommend_for(&catalog, mood, format)?,
        Commands::Run(args) => commands::run(&config, &catalog, &args, format)
            .with_context(|| format!("could not run exercise '{}'", args.id))?,
        Commands::History(args) => {
            let storage = SessionStorage::new()?;
            commands::history(&storage, &args, now, format)?
        }
        Commands::Streak => {
            let storage = SessionStorage::new()?;
            commands::streak(&storage, &config.stats, now, format)?
        }
        Commands::Stats => {
            let storage = SessionStorage::new()?;
            commands::stats(&storage, &config.stats, now, format)?
        }
        Commands::Completions { shell } => commands::completions(shell)?,
    };

    if !output.is_empty() {
        println!("{output}");
    }
    Ok(())
}
