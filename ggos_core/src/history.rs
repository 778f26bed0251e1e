//! Workout history log.
//!
//! Completed workouts are stored as self-contained snapshots, so editing or
//! deleting an exercise never rewrites history. The log keeps only the most
//! recent entries (oldest dropped first).

use crate::storage::{load_json_or_default, save_json};
use crate::{Result, Workout};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;
use uuid::Uuid;

/// Default number of snapshots kept in the log
pub const DEFAULT_HISTORY_LIMIT: usize = 100;

/// One allocation entry as recorded in history
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SnapshotEntry {
    pub name: String,
    pub allocated_amount: u64,
    pub unit: String,
    pub deaths_allocated: u32,
}

/// A completed workout as recorded in history
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct WorkoutSnapshot {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub requested_deaths: u32,
    pub total_deaths_accounted: u32,
    pub summary: String,
    pub entries: Vec<SnapshotEntry>,
}

impl WorkoutSnapshot {
    pub fn from_workout(workout: &Workout, timestamp: DateTime<Utc>) -> Self {
        let entries = workout
            .entries
            .iter()
            .map(|entry| SnapshotEntry {
                name: entry.exercise.name.clone(),
                allocated_amount: entry.allocated_amount,
                unit: entry.unit_kind().label().to_string(),
                deaths_allocated: entry.deaths_allocated,
            })
            .collect();

        Self {
            id: Uuid::new_v4(),
            timestamp,
            requested_deaths: workout.requested_deaths,
            total_deaths_accounted: workout.total_deaths_accounted,
            summary: workout.summary(),
            entries,
        }
    }
}

/// Load the history log, oldest first
///
/// A missing or corrupted file yields an empty history.
pub fn load_history(path: &Path) -> Result<Vec<WorkoutSnapshot>> {
    let history: Vec<WorkoutSnapshot> = load_json_or_default(path)?;
    tracing::debug!("Loaded {} history entries", history.len());
    Ok(history)
}

/// Append a snapshot, keeping at most `limit` of the newest entries
///
/// A `limit` of 0 is treated as 1 so the new snapshot is always kept.
pub fn append_snapshot(path: &Path, snapshot: WorkoutSnapshot, limit: usize) -> Result<()> {
    let limit = limit.max(1);
    let mut history = load_history(path)?;
    history.push(snapshot);

    if history.len() > limit {
        let excess = history.len() - limit;
        history.drain(..excess);
        tracing::debug!("Dropped {} oldest history entries", excess);
    }

    save_json(path, &history)?;
    tracing::info!("History now holds {} workouts", history.len());
    Ok(())
}

/// Snapshot `workout` as completed now and append it to the log
pub fn record_completion(path: &Path, workout: &Workout, limit: usize) -> Result<WorkoutSnapshot> {
    let snapshot = WorkoutSnapshot::from_workout(workout, Utc::now());
    append_snapshot(path, snapshot.clone(), limit)?;
    Ok(snapshot)
}

/// Empty the history log
pub fn clear_history(path: &Path) -> Result<()> {
    save_json(path, &Vec::<WorkoutSnapshot>::new())?;
    tracing::info!("Cleared workout history");
    Ok(())
}
