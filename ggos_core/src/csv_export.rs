//! CSV export of the workout history.
//!
//! Each allocation entry becomes one row, tagged with the workout it came
//! from, so the file can be pivoted in a spreadsheet.

use crate::history::WorkoutSnapshot;
use crate::Result;
use std::fs::OpenOptions;
use std::path::Path;

/// A row in the CSV output
#[derive(Debug, serde::Serialize)]
struct CsvRow<'a> {
    workout_id: String,
    timestamp: String,
    requested_deaths: u32,
    total_deaths_accounted: u32,
    exercise: &'a str,
    amount: u64,
    unit: &'a str,
    deaths_allocated: u32,
}

/// Append history rows to a CSV file, creating it with headers if needed
///
/// Workouts with no entries produce no rows. The file is fsynced before
/// returning. Returns the number of rows written.
pub fn export_history(snapshots: &[WorkoutSnapshot], csv_path: &Path) -> Result<usize> {
    if let Some(parent) = csv_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(csv_path)?;

    // Only a brand-new file gets a header row
    let needs_headers = file.metadata()?.len() == 0;

    let mut writer = csv::WriterBuilder::new()
        .has_headers(needs_headers)
        .from_writer(file);

    let mut rows = 0;
    for snapshot in snapshots {
        let workout_id = snapshot.id.to_string();
        let timestamp = snapshot.timestamp.to_rfc3339();
        for entry in &snapshot.entries {
            writer.serialize(CsvRow {
                workout_id: workout_id.clone(),
                timestamp: timestamp.clone(),
                requested_deaths: snapshot.requested_deaths,
                total_deaths_accounted: snapshot.total_deaths_accounted,
                exercise: &entry.name,
                amount: entry.allocated_amount,
                unit: &entry.unit,
                deaths_allocated: entry.deaths_allocated,
            })?;
            rows += 1;
        }
    }

    writer.flush()?;
    let file = writer
        .into_inner()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e.to_string()))?;
    file.sync_all()?;

    tracing::info!(
        "Exported {} rows from {} workouts to {:?}",
        rows,
        snapshots.len(),
        csv_path
    );
    Ok(rows)
}
