//! Configuration settings for breathe.
//!
//! Settings are loaded from `~/.breathe/config.yaml`.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::cli::args::OutputFormat;
use crate::config::Paths;
use crate::error::BreatheError;
use crate::features::exercise::{BreathPattern, Catalog, ExerciseDefinition, Mood};
use crate::features::session::{HistoryWindow, TimingSettings};
use crate::features::stats::DayBoundary;

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// General settings.
    pub general: GeneralConfig,
    /// Exercise run settings.
    pub exercise: ExerciseConfig,
    /// Statistics settings.
    pub stats: StatsConfig,
    /// User-defined exercises, merged over the built-in catalog.
    pub custom_exercises: Vec<CustomExercise>,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Default output format.
    #[serde(default = "default_output_format")]
    pub default_output: OutputFormat,
    /// Color output setting.
    #[serde(default = "default_color")]
    pub color: ColorSetting,
}

/// Color output setting.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ColorSetting {
    /// Auto-detect based on terminal.
    #[default]
    Auto,
    /// Always use colors.
    Always,
    /// Never use colors.
    Never,
}

/// Exercise run settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExerciseConfig {
    /// Countdown steps before the first inhale.
    #[serde(default = "default_countdown_steps")]
    pub countdown_steps: u32,
    /// Milliseconds per countdown step.
    #[serde(default = "default_countdown_step_ms")]
    pub countdown_step_ms: u64,
    /// Phase timer resolution in milliseconds.
    #[serde(default = "default_tick_ms")]
    pub tick_ms: u64,
    /// Ask for the safety disclaimer before the first run.
    #[serde(default = "default_true")]
    pub require_disclaimer: bool,
}

/// Statistics settings.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct StatsConfig {
    /// Which midnight separates practice days.
    pub day_boundary: DayBoundary,
    /// Only read this many recent sessions; absent reads the full history.
    pub history_window: Option<usize>,
}

/// An exercise defined in the config file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CustomExercise {
    /// Unique identifier; reusing a built-in id replaces it.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Pattern notation such as `4-7-8-0`.
    pub pattern: String,
    /// Rounds suggested when starting.
    #[serde(default = "default_rounds")]
    pub default_rounds: u32,
    /// Short description.
    #[serde(default)]
    pub description: Option<String>,
    /// Moods this exercise helps with.
    #[serde(default)]
    pub moods: Vec<Mood>,
}

// Default value functions for serde
const fn default_output_format() -> OutputFormat {
    OutputFormat::Pretty
}

const fn default_color() -> ColorSetting {
    ColorSetting::Auto
}

const fn default_countdown_steps() -> u32 {
    3
}

const fn default_countdown_step_ms() -> u64 {
    1000
}

const fn default_tick_ms() -> u64 {
    100
}

const fn default_true() -> bool {
    true
}

const fn default_rounds() -> u32 {
    4
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            default_output: default_output_format(),
            color: default_color(),
        }
    }
}

impl Default for ExerciseConfig {
    fn default() -> Self {
        Self {
            countdown_steps: default_countdown_steps(),
            countdown_step_ms: default_countdown_step_ms(),
            tick_ms: default_tick_ms(),
            require_disclaimer: default_true(),
        }
    }
}

impl ExerciseConfig {
    /// Timing for the session state machine.
    #[must_use]
    pub fn timing(&self) -> TimingSettings {
        TimingSettings {
            countdown_steps: self.countdown_steps,
            countdown_step: Duration::from_millis(self.countdown_step_ms.max(1)),
            tick_interval: Duration::from_millis(self.tick_ms.max(1)),
        }
    }
}

impl StatsConfig {
    /// History window for streak and summary queries.
    #[must_use]
    pub const fn window(&self) -> HistoryWindow {
        HistoryWindow::from_limit(self.history_window)
    }
}

impl TryFrom<&CustomExercise> for ExerciseDefinition {
    type Error = BreatheError;

    fn try_from(custom: &CustomExercise) -> Result<Self, Self::Error> {
        let pattern = BreathPattern::parse(&custom.pattern).map_err(|e| {
            BreatheError::Config(format!("custom exercise '{}': {e}", custom.id))
        })?;

        let definition = Self {
            id: custom.id.clone(),
            name: custom.name.clone(),
            description: custom.description.clone().unwrap_or_default(),
            pattern,
            default_rounds: custom.default_rounds,
            moods: custom.moods.clone(),
        };

        definition
            .validate()
            .map_err(|e| BreatheError::Config(e.to_string()))?;
        Ok(definition)
    }
}

impl Config {
    /// Load configuration from the default path.
    ///
    /// If the config file doesn't exist, returns default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed.
    pub fn load() -> Result<Self, BreatheError> {
        let paths = Paths::new()?;
        Self::load_from_path(&paths.config_file)
    }

    /// Load configuration from a specific path.
    ///
    /// If the config file doesn't exist, returns default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed.
    pub fn load_from_path(path: &std::path::Path) -> Result<Self, BreatheError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path).map_err(|e| {
            BreatheError::Config(format!(
                "Failed to read config file {}: {e}",
                path.display()
            ))
        })?;

        serde_yaml::from_str(&contents).map_err(|e| {
            BreatheError::Config(format!(
                "Failed to parse config file {}: {e}",
                path.display()
            ))
        })
    }

    /// Save configuration to a specific path.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be written.
    pub fn save_to_path(&self, path: &std::path::Path) -> Result<(), BreatheError> {
        let contents = serde_yaml::to_string(self)
            .map_err(|e| BreatheError::Config(format!("Failed to serialize config: {e}")))?;

        std::fs::write(path, contents).map_err(|e| {
            BreatheError::Config(format!(
                "Failed to write config file {}: {e}",
                path.display()
            ))
        })
    }

    /// Built-in exercises merged with the custom ones.
    ///
    /// # Errors
    ///
    /// Returns `BreatheError::Config` if a custom exercise is invalid.
    pub fn catalog(&self) -> Result<Catalog, BreatheError> {
        let custom = self
            .custom_exercises
            .iter()
            .map(ExerciseDefinition::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Catalog::with_custom(custom)
    }
}
