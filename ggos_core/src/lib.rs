#![forbid(unsafe_code)]

//! Core domain model and business logic for GGOS, the gaming death
//! workout system.
//!
//! This crate provides:
//! - Exercise definitions and the exercise catalog
//! - The death-to-workout allocator
//! - Workout summaries and history statistics
//! - Persistence (exercises, settings, history) and CSV export

pub mod types;
pub mod error;
pub mod catalog;
pub mod workout;
pub mod allocator;
pub mod config;
pub mod logging;
pub mod storage;
pub mod history;
pub mod stats;
pub mod csv_export;
pub mod session;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::{ExerciseChanges, ExerciseDefinition, UnitKind};
pub use catalog::{default_exercises, ExerciseCatalog};
pub use workout::{AllocationEntry, UnitGroups, UnitTotals, Workout};
pub use allocator::{generate_workout, generate_workout_random, DrawSource, RngSource};
pub use config::Config;
pub use storage::{Settings, Storage};
pub use history::{SnapshotEntry, WorkoutSnapshot};
pub use stats::{HistoryFilter, HistoryStats};
pub use csv_export::export_history;
pub use session::WorkoutSession;
