//! # smokefree Core Library
//!
//! Core logic for the smokefree quit-smoking tracker. The CLI is a thin
//! delivery layer over this crate.
//!
//! ## Architecture
//!
//! - **Milestones**: the static recovery timeline and the pure progress
//!   engine that places an elapsed duration on it
//! - **Elapsed**: whole-minute difference between the quit instant and now,
//!   plus the [`Clock`] seam that keeps the engine free of wall-clock reads
//! - **Storage**: SQLite key-value state (quit instant, per-day counters),
//!   schema migrations, legacy flat-file import and TOML configuration
//! - **Tracker**: wires storage, clock and engine into the operations the
//!   CLI exposes
//!
//! ## Key Components
//!
//! - [`compute_progress`]: milestone progress for an [`ElapsedState`]
//! - [`MilestoneTable`]: ordered milestone table
//! - [`Tracker`]: progress, stats and counter operations
//! - [`Database`]: persisted tracker state
//! - [`Config`]: application configuration management

pub mod elapsed;
pub mod error;
pub mod milestones;
pub mod storage;
pub mod tracker;

pub use elapsed::{parse_datetime, Clock, ElapsedState, FixedClock, SystemClock};
pub use error::{ConfigError, CoreError, DatabaseError, ValidationError};
pub use milestones::{compute_progress, MilestoneEntry, MilestoneTable, ProgressResult};
pub use storage::{Config, Database};
pub use tracker::{get_progress, StatsReport, Tracker};
