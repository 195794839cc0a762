//! breathe - guided breathing exercises in the terminal
//!
//! This crate provides the exercise catalog, the session state machine that
//! times each breathing phase, local session history and streak tracking.

#![deny(unsafe_code)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod cli;
pub mod config;
pub mod error;
pub mod features;
pub mod logging;
pub mod output;
pub mod storage;
pub mod tui;

pub use cli::args::{Cli, Commands, OutputFormat};
pub use error::BreatheError;
pub use features::session::SessionMachine;
pub use features::stats::StreakResult;
