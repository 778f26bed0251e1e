//! Generated workouts and their human-readable summaries.

use crate::{ExerciseDefinition, UnitKind};
use serde::{Deserialize, Serialize};

/// Summary text for a workout with nothing to do
pub const NO_EXERCISES: &str = "No exercises";

/// One exercise's share of a generated workout
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct AllocationEntry {
    /// Snapshot of the definition at generation time
    pub exercise: ExerciseDefinition,
    pub allocated_amount: u64,
    pub deaths_allocated: u32,
}

impl AllocationEntry {
    pub(crate) fn new(exercise: &ExerciseDefinition, deaths_allocated: u32) -> Self {
        Self {
            exercise: exercise.clone(),
            allocated_amount: exercise.total_for(deaths_allocated),
            deaths_allocated,
        }
    }

    pub fn unit_kind(&self) -> UnitKind {
        self.exercise.unit_kind
    }

    /// e.g. `"6 Squats (3 deaths)"`
    pub fn display_text(&self) -> String {
        format!(
            "{} {} ({} deaths)",
            self.allocated_amount, self.exercise.name, self.deaths_allocated
        )
    }
}

/// Amount totals per unit kind
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct UnitTotals {
    pub reps: u64,
    pub seconds: u64,
}

impl UnitTotals {
    pub(crate) fn add(&mut self, unit_kind: UnitKind, amount: u64) {
        match unit_kind {
            UnitKind::Count => self.reps += amount,
            UnitKind::DurationSeconds => self.seconds += amount,
        }
    }

    /// `"12 reps + 8 seconds"`, dropping zero parts
    pub fn format(&self) -> String {
        let mut parts = Vec::with_capacity(2);
        if self.reps > 0 {
            parts.push(format!("{} reps", self.reps));
        }
        if self.seconds > 0 {
            parts.push(format!("{} seconds", self.seconds));
        }

        if parts.is_empty() {
            NO_EXERCISES.to_string()
        } else {
            parts.join(" + ")
        }
    }
}

/// Entries split by unit kind, each group in workout order
#[derive(Clone, Debug, Default)]
pub struct UnitGroups<'a> {
    pub reps: Vec<&'a AllocationEntry>,
    pub seconds: Vec<&'a AllocationEntry>,
}

/// Result of one allocator run
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Workout {
    pub entries: Vec<AllocationEntry>,
    pub total_deaths_accounted: u32,
    pub requested_deaths: u32,
}

impl Workout {
    /// A workout with no entries
    pub fn empty(requested_deaths: u32) -> Self {
        Self {
            entries: Vec::new(),
            total_deaths_accounted: 0,
            requested_deaths,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Deaths the allocator left unassigned
    pub fn shortfall(&self) -> u32 {
        self.requested_deaths
            .saturating_sub(self.total_deaths_accounted)
    }

    pub fn totals(&self) -> UnitTotals {
        let mut totals = UnitTotals::default();
        for entry in &self.entries {
            totals.add(entry.unit_kind(), entry.allocated_amount);
        }
        totals
    }

    /// Aggregate summary, e.g. `"12 reps + 8 seconds"` or `"No exercises"`
    pub fn summary(&self) -> String {
        self.totals().format()
    }

    pub fn grouped_by_unit(&self) -> UnitGroups<'_> {
        let mut groups = UnitGroups::default();
        for entry in &self.entries {
            match entry.unit_kind() {
                UnitKind::Count => groups.reps.push(entry),
                UnitKind::DurationSeconds => groups.seconds.push(entry),
            }
        }
        groups
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, unit: UnitKind, per_death: u32, deaths: u32) -> AllocationEntry {
        let ex = ExerciseDefinition::new(name, unit, per_death).unwrap();
        AllocationEntry::new(&ex, deaths)
    }

    fn workout(entries: Vec<AllocationEntry>) -> Workout {
        let total = entries.iter().map(|e| e.deaths_allocated).sum();
        Workout {
            entries,
            total_deaths_accounted: total,
            requested_deaths: total,
        }
    }

    #[test]
    fn test_summary_reps_and_seconds() {
        let w = workout(vec![
            entry("Squats", UnitKind::Count, 4, 3),
            entry("Wall Sit", UnitKind::DurationSeconds, 4, 2),
        ]);
        assert_eq!(w.summary(), "12 reps + 8 seconds");
    }

    #[test]
    fn test_summary_single_unit() {
        let reps = workout(vec![
            entry("Squats", UnitKind::Count, 2, 1),
            entry("Burpees", UnitKind::Count, 1, 3),
        ]);
        assert_eq!(reps.summary(), "5 reps");

        let secs = workout(vec![entry("Plank", UnitKind::DurationSeconds, 5, 2)]);
        assert_eq!(secs.summary(), "10 seconds");
    }

    #[test]
    fn test_summary_empty() {
        assert_eq!(Workout::empty(7).summary(), NO_EXERCISES);
    }

    #[test]
    fn test_summary_is_stable() {
        let w = workout(vec![
            entry("Plank", UnitKind::DurationSeconds, 5, 1),
            entry("Squats", UnitKind::Count, 2, 2),
        ]);
        assert_eq!(w.summary(), w.summary());
        assert_eq!(w.summary(), "4 reps + 5 seconds");
    }

    #[test]
    fn test_grouped_by_unit_keeps_order() {
        let w = workout(vec![
            entry("Squats", UnitKind::Count, 2, 1),
            entry("Plank", UnitKind::DurationSeconds, 5, 1),
            entry("Lunges", UnitKind::Count, 2, 2),
        ]);

        let groups = w.grouped_by_unit();
        let reps: Vec<_> = groups.reps.iter().map(|e| e.exercise.name.as_str()).collect();
        let secs: Vec<_> = groups.seconds.iter().map(|e| e.exercise.name.as_str()).collect();
        assert_eq!(reps, vec!["Squats", "Lunges"]);
        assert_eq!(secs, vec!["Plank"]);
    }

    #[test]
    fn test_display_text_and_shortfall() {
        let e = entry("Squats", UnitKind::Count, 2, 3);
        assert_eq!(e.display_text(), "6 Squats (3 deaths)");

        let mut w = workout(vec![e]);
        w.requested_deaths = 5;
        assert_eq!(w.shortfall(), 2);
    }
}
