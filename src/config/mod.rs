//! Configuration management for breathe.
//!
//! This module handles loading configuration from `~/.breathe/`.

mod paths;
mod settings;

pub use paths::{Paths, HOME_ENV};
pub use settings::{ColorSetting, Config, CustomExercise, ExerciseConfig, GeneralConfig, StatsConfig};
