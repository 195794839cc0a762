//! Exercise sessions.
//!
//! - The run state machine (countdown, phase cycling, pause, abort)
//! - Collaborator traits for recording and reading sessions
//! - SQLite-backed session storage

pub mod lifecycle;
pub mod machine;
pub mod record;
pub mod storage;

pub use lifecycle::{
    ConsentGate, HistoryWindow, SessionHistory, SessionLifecycle, StartedSession, DISCLAIMER,
};
pub use machine::{
    AbortReason, CompletionSummary, Notice, NoticeLevel, RunStatus, SessionMachine,
    SessionRunState, StartOutcome, TickEvent, TimingSettings,
};
pub use record::{ExerciseSessionRecord, Timestamp};
pub use storage::SessionStorage;
