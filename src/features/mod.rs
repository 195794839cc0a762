//! Feature implementations for breathe.
//!
//! - Exercise catalog and mood recommendations
//! - Exercise sessions: run state machine and history storage
//! - Practice statistics: streaks and achievements

pub mod exercise;
pub mod session;
pub mod stats;
