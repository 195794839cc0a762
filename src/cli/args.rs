use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use serde::{Deserialize, Serialize};

use crate::features::exercise::Mood;

#[derive(Parser)]
#[command(name = "breathe")]
#[command(about = "Guided breathing exercises with practice streaks")]
#[command(long_about = "breathe - guided breathing exercises in the terminal

Runs timed breathing patterns (box breathing, 4-7-8, coherent breathing and
more), records completed sessions locally and tracks your practice streak.

QUICK START:
  breathe list                 Show available exercises
  breathe recommend anxious    Suggest exercises for how you feel
  breathe run box              Start box breathing
  breathe streak               Show your current and longest streak

OUTPUT FORMATS:
  --output pretty    Human-readable colored output (default)
  --output json      Machine-readable JSON for scripting

Data lives in ~/.breathe (override with BREATHE_HOME).")]
#[command(version, propagate_version = true)]
pub struct Cli {
    /// Output format for command results
    ///
    /// Defaults to `general.default_output` from the config file.
    #[arg(short, long, value_enum, global = true)]
    pub output: Option<OutputFormat>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for command results.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable colored output.
    #[default]
    Pretty,
    /// Machine-readable JSON output.
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List available exercises
    ///
    /// Shows built-in exercises and any custom exercises from the config
    /// file, with their pattern and estimated duration.
    ///
    /// # Examples
    ///
    ///   breathe list
    ///   breathe ls -o json
    #[command(alias = "ls")]
    List,

    /// Show one exercise in detail
    ///
    /// Prints the phase timeline of a single round and the moods the
    /// exercise is suited for.
    ///
    /// # Examples
    ///
    ///   breathe show box
    ///   breathe show relaxing-478 -o json
    Show {
        /// Exercise id (see `breathe list`)
        id: String,
    },

    /// Suggest exercises for a mood
    ///
    /// Moods: anxious, stressed, tired, unfocused, sleepless, calm.
    ///
    /// # Examples
    ///
    ///   breathe recommend anxious
    ///   breathe rec tired
    #[command(alias = "rec")]
    Recommend {
        /// How you feel right now
        mood: Mood,
    },

    /// Run an exercise interactively
    ///
    /// Opens a full-screen view with a countdown, the current phase and a
    /// progress gauge.
    ///
    /// Keys: space pause/resume, +/- rounds, e end, x or Esc emergency stop,
    /// r start again, q quit.
    ///
    /// # Examples
    ///
    ///   breathe run box
    ///   breathe run relaxing-478 --rounds 8
    #[command(alias = "r")]
    Run(RunArgs),

    /// Show session history
    ///
    /// # Examples
    ///
    ///   breathe history
    ///   breathe history --limit 5
    ///   breathe history --orphaned
    #[command(alias = "h")]
    History(HistoryArgs),

    /// Show current and longest practice streak
    Streak,

    /// Show practice totals and achievements
    Stats,

    /// Generate shell completions
    ///
    /// Example: breathe completions zsh > ~/.zsh/completions/_breathe
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Arguments for `breathe run`.
#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    /// Exercise id (see `breathe list`)
    pub id: String,

    /// Number of rounds (defaults to the exercise's suggestion)
    #[arg(long, short = 'n')]
    pub rounds: Option<u32>,

    /// Accept the safety disclaimer without prompting
    #[arg(long)]
    pub accept_disclaimer: bool,
}

/// Arguments for `breathe history`.
#[derive(Args, Debug, Clone)]
pub struct HistoryArgs {
    /// Maximum number of sessions to show
    #[arg(long, short = 'l', default_value = "20")]
    pub limit: usize,

    /// Show sessions that started but never completed
    #[arg(long)]
    pub orphaned: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_output_format_default() {
        let cli = Cli::try_parse_from(["breathe", "list"]).unwrap();
        assert!(cli.output.is_none());
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn test_cli_output_format_json() {
        let cli = Cli::try_parse_from(["breathe", "--output", "json", "list"]).unwrap();
        assert_eq!(cli.output, Some(OutputFormat::Json));
    }

    #[test]
    fn test_cli_output_format_short_after_subcommand() {
        let cli = Cli::try_parse_from(["breathe", "streak", "-o", "json"]).unwrap();
        assert_eq!(cli.output, Some(OutputFormat::Json));
    }

    #[test]
    fn test_cli_verbose_count() {
        let cli = Cli::try_parse_from(["breathe", "-vv", "list"]).unwrap();
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_cli_list_alias() {
        let cli = Cli::try_parse_from(["breathe", "ls"]).unwrap();
        assert!(matches!(cli.command, Commands::List));
    }

    #[test]
    fn test_cli_show() {
        let cli = Cli::try_parse_from(["breathe", "show", "box"]).unwrap();
        if let Commands::Show { id } = cli.command {
            assert_eq!(id, "box");
        } else {
            panic!("Expected Show command");
        }
    }

    #[test]
    fn test_cli_recommend_parses_mood() {
        let cli = Cli::try_parse_from(["breathe", "recommend", "Anxious"]).unwrap();
        if let Commands::Recommend { mood } = cli.command {
            assert_eq!(mood, Mood::Anxious);
        } else {
            panic!("Expected Recommend command");
        }
    }

    #[test]
    fn test_cli_recommend_rejects_unknown_mood() {
        assert!(Cli::try_parse_from(["breathe", "recommend", "hungry"]).is_err());
    }

    #[test]
    fn test_cli_run_args() {
        let cli = Cli::try_parse_from([
            "breathe",
            "run",
            "relaxing-478",
            "--rounds",
            "8",
            "--accept-disclaimer",
        ])
        .unwrap();
        if let Commands::Run(args) = cli.command {
            assert_eq!(args.id, "relaxing-478");
            assert_eq!(args.rounds, Some(8));
            assert!(args.accept_disclaimer);
        } else {
            panic!("Expected Run command");
        }
    }

    #[test]
    fn test_cli_run_defaults() {
        let cli = Cli::try_parse_from(["breathe", "r", "box"]).unwrap();
        if let Commands::Run(args) = cli.command {
            assert!(args.rounds.is_none());
            assert!(!args.accept_disclaimer);
        } else {
            panic!("Expected Run command");
        }
    }

    #[test]
    fn test_cli_history_args() {
        let cli = Cli::try_parse_from(["breathe", "history"]).unwrap();
        if let Commands::History(args) = cli.command {
            assert_eq!(args.limit, 20);
            assert!(!args.orphaned);
        } else {
            panic!("Expected History command");
        }

        let cli = Cli::try_parse_from(["breathe", "h", "--limit", "5", "--orphaned"]).unwrap();
        if let Commands::History(args) = cli.command {
            assert_eq!(args.limit, 5);
            assert!(args.orphaned);
        } else {
            panic!("Expected History command");
        }
    }

    #[test]
    fn test_cli_completions() {
        let cli = Cli::try_parse_from(["breathe", "completions", "zsh"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Completions { shell: Shell::Zsh }
        ));
    }

    #[test]
    fn test_cli_requires_subcommand() {
        assert!(Cli::try_parse_from(["breathe"]).is_err());
    }
}
