//! Storage layer for breathe.
//!
//! SQLite persistence for exercise session history.

mod database;
mod migrations;

pub use database::Database;
