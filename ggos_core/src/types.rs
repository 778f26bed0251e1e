//! Core domain types for GGOS.
//!
//! This module defines the exercise-side types shared by the catalog,
//! the allocator and the persistence layer:
//! - Unit kinds (reps vs. seconds)
//! - Exercise definitions and their edit changesets

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

// ============================================================================
// Unit Types
// ============================================================================

/// How an exercise amount is measured
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum UnitKind {
    /// Repetition count
    #[serde(rename = "reps")]
    Count,
    /// Hold or duration in seconds
    #[serde(rename = "seconds")]
    DurationSeconds,
}

impl UnitKind {
    /// Display label, also used as the persisted tag
    pub fn label(&self) -> &'static str {
        match self {
            UnitKind::Count => "reps",
            UnitKind::DurationSeconds => "seconds",
        }
    }

    /// Parse a user-supplied unit name
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "reps" | "rep" | "count" => Some(UnitKind::Count),
            "seconds" | "second" | "secs" | "s" | "duration" => Some(UnitKind::DurationSeconds),
            _ => None,
        }
    }
}

impl fmt::Display for UnitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ============================================================================
// Exercise Definitions
// ============================================================================

/// A single exercise the allocator can assign deaths to
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExerciseDefinition {
    pub id: Uuid,
    pub name: String,
    #[serde(rename = "unit_type")]
    pub unit_kind: UnitKind,
    pub amount_per_death: u32,
}

impl ExerciseDefinition {
    /// Create a new definition with a freshly generated id
    ///
    /// Name uniqueness is the catalog's job; this only checks that the
    /// name is non-empty and the amount is positive.
    pub fn new(name: impl Into<String>, unit_kind: UnitKind, amount_per_death: u32) -> Result<Self> {
        let name = validate_name(&name.into())?;
        validate_amount(amount_per_death)?;
        Ok(Self {
            id: Uuid::new_v4(),
            name,
            unit_kind,
            amount_per_death,
        })
    }

    /// Total amount owed for a number of deaths
    pub fn total_for(&self, deaths: u32) -> u64 {
        u64::from(self.amount_per_death) * u64::from(deaths)
    }

    /// Case-insensitive name comparison used for catalog uniqueness
    pub fn name_matches(&self, other: &str) -> bool {
        self.name.to_lowercase() == other.trim().to_lowercase()
    }
}

/// Field changes for an in-place exercise edit; `None` leaves a field alone
#[derive(Clone, Debug, Default)]
pub struct ExerciseChanges {
    pub name: Option<String>,
    pub unit_kind: Option<UnitKind>,
    pub amount_per_death: Option<u32>,
}

impl ExerciseChanges {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.unit_kind.is_none() && self.amount_per_death.is_none()
    }
}

pub(crate) fn validate_name(name: &str) -> Result<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(Error::InvalidExercise("name must not be empty".into()));
    }
    Ok(trimmed.to_string())
}

pub(crate) fn validate_amount(amount: u32) -> Result<()> {
    if amount == 0 {
        return Err(Error::InvalidExercise(
            "amount per death must be positive".into(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_exercise_gets_unique_id() {
        let a = ExerciseDefinition::new("Squats", UnitKind::Count, 2).unwrap();
        let b = ExerciseDefinition::new("Squats", UnitKind::Count, 2).unwrap();
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_total_for() {
        let squats = ExerciseDefinition::new("Squats", UnitKind::Count, 2).unwrap();
        let plank = ExerciseDefinition::new("Plank", UnitKind::DurationSeconds, 5).unwrap();
        assert_eq!(squats.total_for(5), 10);
        assert_eq!(plank.total_for(3), 15);

        let big = ExerciseDefinition::new("Big", UnitKind::Count, u32::MAX).unwrap();
        assert_eq!(big.total_for(3), 3 * u64::from(u32::MAX));
    }

    #[test]
    fn test_rejects_empty_name_and_zero_amount() {
        assert!(matches!(
            ExerciseDefinition::new("   ", UnitKind::Count, 1),
            Err(Error::InvalidExercise(_))
        ));
        assert!(matches!(
            ExerciseDefinition::new("Plank", UnitKind::DurationSeconds, 0),
            Err(Error::InvalidExercise(_))
        ));
    }

    #[test]
    fn test_name_is_trimmed() {
        let ex = ExerciseDefinition::new("  Lunges ", UnitKind::Count, 2).unwrap();
        assert_eq!(ex.name, "Lunges");
    }

    #[test]
    fn test_unit_serializes_as_label() {
        let ex = ExerciseDefinition::new("Wall Sit", UnitKind::DurationSeconds, 3).unwrap();
        let json = serde_json::to_value(&ex).unwrap();
        assert_eq!(json["unit_type"], "seconds");
        assert_eq!(json["amount_per_death"], 3);
        assert_eq!(UnitKind::Count.to_string(), "reps");
    }

    #[test]
    fn test_unit_parse() {
        assert_eq!(UnitKind::parse("Reps"), Some(UnitKind::Count));
        assert_eq!(UnitKind::parse("seconds"), Some(UnitKind::DurationSeconds));
        assert_eq!(UnitKind::parse("furlongs"), None);
    }
}
