//! Breathing exercises.
//!
//! - Phase patterns and exercise definitions
//! - The static exercise catalog
//! - Mood-based recommendation

pub mod catalog;
pub mod definition;
pub mod recommend;

pub use catalog::Catalog;
pub use definition::{BreathPattern, ExerciseDefinition, Phase};
pub use recommend::{recommend, Mood};
