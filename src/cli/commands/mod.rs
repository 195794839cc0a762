//! Command implementations for breathe.
//!
//! Each command returns the text to print.

mod completions;
mod exercises;
mod history;
mod run;
mod stats;

pub use completions::completions;
pub use exercises::{list, recommend_for, show};
pub use history::history;
pub use run::{prepare, run};
pub use stats::{stats, streak};
