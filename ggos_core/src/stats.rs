//! Aggregate statistics and filters over the workout history.

use crate::history::WorkoutSnapshot;
use crate::UnitKind;

/// Requested-death threshold separating "high" from "low" death workouts
pub const HIGH_DEATHS_THRESHOLD: u32 = 10;

/// Number of snapshots shown by [`HistoryFilter::Recent`]
pub const RECENT_COUNT: usize = 10;

/// Totals across a set of history snapshots
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct HistoryStats {
    pub total_workouts: usize,
    pub total_deaths: u64,
    pub average_deaths: f64,
    pub total_reps: u64,
    pub total_seconds: u64,
}

impl HistoryStats {
    pub fn from_snapshots(snapshots: &[WorkoutSnapshot]) -> Self {
        let mut stats = HistoryStats {
            total_workouts: snapshots.len(),
            ..Default::default()
        };

        for snapshot in snapshots {
            stats.total_deaths += u64::from(snapshot.requested_deaths);
            for entry in &snapshot.entries {
                let amount = entry.allocated_amount;
                match UnitKind::parse(&entry.unit) {
                    Some(UnitKind::Count) => stats.total_reps += amount,
                    Some(UnitKind::DurationSeconds) => stats.total_seconds += amount,
                    None => tracing::warn!(
                        "Unknown unit '{}' in history entry '{}'",
                        entry.unit,
                        entry.name
                    ),
                }
            }
        }

        if stats.total_workouts > 0 {
            stats.average_deaths = stats.total_deaths as f64 / stats.total_workouts as f64;
        }

        stats
    }
}

/// Which history snapshots to show
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum HistoryFilter {
    #[default]
    All,
    /// The last ten workouts
    Recent,
    /// Ten or more requested deaths
    HighDeaths,
    /// Fewer than ten requested deaths
    LowDeaths,
}

impl HistoryFilter {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "all" => Some(HistoryFilter::All),
            "recent" => Some(HistoryFilter::Recent),
            "high" | "high_deaths" => Some(HistoryFilter::HighDeaths),
            "low" | "low_deaths" => Some(HistoryFilter::LowDeaths),
            _ => None,
        }
    }

    /// Apply the filter to a log stored oldest first; result is newest first
    pub fn apply<'a>(&self, history: &'a [WorkoutSnapshot]) -> Vec<&'a WorkoutSnapshot> {
        let mut selected: Vec<&WorkoutSnapshot> = match self {
            HistoryFilter::All => history.iter().collect(),
            HistoryFilter::Recent => {
                let start = history.len().saturating_sub(RECENT_COUNT);
                history[start..].iter().collect()
            }
            HistoryFilter::HighDeaths => history
                .iter()
                .filter(|s| s.requested_deaths >= HIGH_DEATHS_THRESHOLD)
                .collect(),
            HistoryFilter::LowDeaths => history
                .iter()
                .filter(|s| s.requested_deaths < HIGH_DEATHS_THRESHOLD)
                .collect(),
        };

        selected.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        selected
    }
}
