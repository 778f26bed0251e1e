//! Exercise catalog and the built-in starter set.
//!
//! The catalog is an ordered list of exercise definitions. It enforces
//! case-insensitive name uniqueness on insert and rename; everything else
//! about a definition is validated by the definition itself.

use crate::types::{validate_amount, validate_name};
use crate::{Error, ExerciseChanges, ExerciseDefinition, Result, UnitKind};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use uuid::Uuid;

/// Name, unit and amount of every starter exercise, built once
static DEFAULT_TEMPLATE: Lazy<Vec<(&'static str, UnitKind, u32)>> =
    Lazy::new(build_default_template);

/// Ordered collection of exercise definitions
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct ExerciseCatalog {
    exercises: Vec<ExerciseDefinition>,
}

impl ExerciseCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from definitions as-is (e.g. loaded from disk)
    ///
    /// No uniqueness check is done here; call [`ExerciseCatalog::validate`]
    /// to find problems in externally supplied data.
    pub fn from_definitions(exercises: Vec<ExerciseDefinition>) -> Self {
        Self { exercises }
    }

    /// The starter catalog, with fresh ids
    pub fn with_defaults() -> Self {
        Self::from_definitions(default_exercises())
    }

    /// Append a definition, rejecting case-insensitive name collisions
    pub fn add(&mut self, definition: ExerciseDefinition) -> Result<()> {
        if self.find_by_name(&definition.name).is_some() {
            return Err(Error::DuplicateName(definition.name));
        }
        tracing::debug!("Added exercise '{}' ({})", definition.name, definition.id);
        self.exercises.push(definition);
        Ok(())
    }

    /// Apply field changes to the exercise with `id`
    ///
    /// Renaming onto the exercise's own name (in any case) is fine; renaming
    /// onto another entry's name is a `DuplicateName`. Nothing is changed
    /// when an error is returned.
    pub fn update(&mut self, id: Uuid, changes: ExerciseChanges) -> Result<&ExerciseDefinition> {
        let index = self.index_of(id).ok_or(Error::NotFound(id))?;

        let new_name = match changes.name {
            Some(ref name) => {
                let name = validate_name(name)?;
                let collides = self
                    .exercises
                    .iter()
                    .any(|e| e.id != id && e.name_matches(&name));
                if collides {
                    return Err(Error::DuplicateName(name));
                }
                Some(name)
            }
            None => None,
        };
        if let Some(amount) = changes.amount_per_death {
            validate_amount(amount)?;
        }

        let exercise = &mut self.exercises[index];
        if let Some(name) = new_name {
            exercise.name = name;
        }
        if let Some(unit_kind) = changes.unit_kind {
            exercise.unit_kind = unit_kind;
        }
        if let Some(amount) = changes.amount_per_death {
            exercise.amount_per_death = amount;
        }

        tracing::debug!("Updated exercise {}", id);
        Ok(&self.exercises[index])
    }

    /// Remove and return the exercise with `id`
    pub fn remove(&mut self, id: Uuid) -> Result<ExerciseDefinition> {
        let index = self.index_of(id).ok_or(Error::NotFound(id))?;
        let removed = self.exercises.remove(index);
        tracing::debug!("Removed exercise '{}'", removed.name);
        Ok(removed)
    }

    pub fn clear(&mut self) {
        self.exercises.clear();
    }

    /// All definitions, in insertion order
    pub fn all(&self) -> &[ExerciseDefinition] {
        &self.exercises
    }

    pub fn get(&self, id: Uuid) -> Option<&ExerciseDefinition> {
        self.exercises.iter().find(|e| e.id == id)
    }

    /// Case-insensitive lookup by name
    pub fn find_by_name(&self, name: &str) -> Option<&ExerciseDefinition> {
        self.exercises.iter().find(|e| e.name_matches(name))
    }

    pub fn len(&self) -> usize {
        self.exercises.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exercises.is_empty()
    }

    /// Add every preset whose name is not already taken
    ///
    /// Returns how many presets were added.
    pub fn merge_presets(&mut self, presets: Vec<ExerciseDefinition>) -> usize {
        let mut added = 0;
        for preset in presets {
            if self.add(preset).is_ok() {
                added += 1;
            }
        }
        added
    }

    /// Validate the catalog for consistency
    ///
    /// Returns a list of validation errors, or empty Vec if valid.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        let mut seen_ids = HashSet::new();
        let mut seen_names = HashSet::new();

        for exercise in &self.exercises {
            if exercise.name.trim().is_empty() {
                errors.push(format!("Exercise {} has empty name", exercise.id));
            }
            if exercise.amount_per_death == 0 {
                errors.push(format!(
                    "Exercise '{}' has zero amount per death",
                    exercise.name
                ));
            }
            if !seen_ids.insert(exercise.id) {
                errors.push(format!("Duplicate exercise id {}", exercise.id));
            }
            if !seen_names.insert(exercise.name.trim().to_lowercase()) {
                errors.push(format!("Duplicate exercise name '{}'", exercise.name));
            }
        }

        errors
    }

    fn index_of(&self, id: Uuid) -> Option<usize> {
        self.exercises.iter().position(|e| e.id == id)
    }
}

/// The equipment-free starter exercises offered to new users
///
/// Every call returns new definitions with fresh ids.
pub fn default_exercises() -> Vec<ExerciseDefinition> {
    DEFAULT_TEMPLATE
        .iter()
        .map(|&(name, unit_kind, amount_per_death)| ExerciseDefinition {
            id: Uuid::new_v4(),
            name: name.to_string(),
            unit_kind,
            amount_per_death,
        })
        .collect()
}

fn build_default_template() -> Vec<(&'static str, UnitKind, u32)> {
    use UnitKind::{Count, DurationSeconds};

    vec![
        // Core
        ("Squats", Count, 2),
        ("Push-ups", Count, 1),
        ("Sit-ups", Count, 2),
        ("Plank", DurationSeconds, 5),
        // Cardio
        ("Jumping Jacks", Count, 5),
        ("Burpees", Count, 1),
        ("Mountain Climbers", Count, 3),
        ("High Knees", Count, 4),
        // Legs
        ("Lunges", Count, 2),
        ("Calf Raises", Count, 3),
        ("Wall Sit", DurationSeconds, 3),
        // Arms
        ("Tricep Dips", Count, 2),
        ("Arm Circles", Count, 4),
        // Core variations
        ("Bicycle Crunches", Count, 2),
        ("Russian Twists", Count, 3),
        ("Superman Hold", DurationSeconds, 4),
        // Full body
        ("Bear Crawls", Count, 1),
        ("Spider-Man Push-ups", Count, 1),
        ("Donkey Kicks", Count, 2),
        ("Fire Hydrants", Count, 2),
    ]
}
