//! Single-user session tying the catalog, allocator and storage together.
//!
//! A front end owns one `WorkoutSession` for the lifetime of the user's
//! interaction. The catalog lives here; generated workouts are plain values
//! handed back to the caller.

use crate::allocator::{self, DrawSource};
use crate::history::WorkoutSnapshot;
use crate::storage::Storage;
use crate::{Config, ExerciseCatalog, ExerciseChanges, ExerciseDefinition, Result, Workout};
use uuid::Uuid;

pub struct WorkoutSession {
    storage: Storage,
    catalog: ExerciseCatalog,
    history_limit: usize,
}

impl WorkoutSession {
    /// Open the data directory, seeding the starter catalog if configured
    pub fn open(storage: Storage, config: &Config) -> Result<Self> {
        let catalog = if config.catalog.seed_defaults {
            storage.load_or_seed_catalog()?
        } else {
            storage.load_catalog()?
        };

        tracing::debug!(
            "Opened session in {:?} with {} exercises",
            storage.data_dir(),
            catalog.len()
        );

        Ok(Self {
            storage,
            catalog,
            history_limit: config.history.max_entries,
        })
    }

    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    pub fn catalog(&self) -> &ExerciseCatalog {
        &self.catalog
    }

    /// Generate a workout from the current catalog with the thread RNG
    pub fn generate(&self, deaths: i64) -> Workout {
        allocator::generate_workout_random(self.catalog.all(), deaths)
    }

    /// Generate a workout with a caller-supplied draw source
    pub fn generate_with<S: DrawSource + ?Sized>(&self, deaths: i64, source: &mut S) -> Workout {
        allocator::generate_workout(self.catalog.all(), deaths, source)
    }

    /// Append a completed workout to the history log
    pub fn record_completion(&self, workout: &Workout) -> Result<WorkoutSnapshot> {
        self.storage.record_completion(workout, self.history_limit)
    }

    // Catalog edits are persisted immediately.

    pub fn add_exercise(&mut self, definition: ExerciseDefinition) -> Result<()> {
        self.catalog.add(definition)?;
        self.storage.save_catalog(&self.catalog)
    }

    pub fn update_exercise(&mut self, id: Uuid, changes: ExerciseChanges) -> Result<ExerciseDefinition> {
        let updated = self.catalog.update(id, changes)?.clone();
        self.storage.save_catalog(&self.catalog)?;
        Ok(updated)
    }

    pub fn remove_exercise(&mut self, id: Uuid) -> Result<ExerciseDefinition> {
        let removed = self.catalog.remove(id)?;
        self.storage.save_catalog(&self.catalog)?;
        Ok(removed)
    }

    pub fn clear_exercises(&mut self) -> Result<()> {
        self.catalog.clear();
        self.storage.save_catalog(&self.catalog)
    }

    /// Replace the catalog with the starter set
    pub fn reset_to_defaults(&mut self) -> Result<()> {
        self.catalog = ExerciseCatalog::with_defaults();
        self.storage.save_catalog(&self.catalog)
    }

    /// Add starter exercises whose names are not taken; returns how many
    pub fn merge_defaults(&mut self) -> Result<usize> {
        let added = self.catalog.merge_presets(crate::default_exercises());
        if added > 0 {
            self.storage.save_catalog(&self.catalog)?;
        }
        Ok(added)
    }
}
