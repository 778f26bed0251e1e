//! JSON persistence for the exercise catalog and settings.
//!
//! Every file lives under one data directory:
//! - `exercises.json`: the catalog as a JSON array
//! - `settings.json`: flat key/value settings for the front end
//! - `workout_history.json`: completed workouts (see [`crate::history`])
//!
//! Reads take a shared lock and fall back to defaults on corruption.
//! Writes go to a temp file in the same directory, are fsynced, and are
//! renamed over the target.

use crate::history::{self, WorkoutSnapshot};
use crate::{Error, ExerciseCatalog, Result, Workout};
use fs2::FileExt;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

pub const EXERCISES_FILE: &str = "exercises.json";
pub const SETTINGS_FILE: &str = "settings.json";
pub const HISTORY_FILE: &str = "workout_history.json";

/// Front-end settings: string keys to JSON primitives
pub type Settings = BTreeMap<String, Value>;

/// Settings every front end can rely on being present
pub fn default_settings() -> Settings {
    let mut settings = Settings::new();
    settings.insert("auto_input_enabled".into(), Value::Bool(false));
    settings.insert("fitness_tracker_enabled".into(), Value::Bool(false));
    settings.insert("theme".into(), Value::String("dark".into()));
    settings.insert("window_size".into(), Value::String("800x600".into()));
    settings
}

/// File-backed store rooted at a data directory
#[derive(Clone, Debug)]
pub struct Storage {
    data_dir: PathBuf,
}

impl Storage {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn exercises_path(&self) -> PathBuf {
        self.data_dir.join(EXERCISES_FILE)
    }

    pub fn settings_path(&self) -> PathBuf {
        self.data_dir.join(SETTINGS_FILE)
    }

    pub fn history_path(&self) -> PathBuf {
        self.data_dir.join(HISTORY_FILE)
    }

    /// Load the catalog; missing or unreadable files give an empty catalog
    pub fn load_catalog(&self) -> Result<ExerciseCatalog> {
        let catalog: ExerciseCatalog = load_json_or_default(&self.exercises_path())?;
        for problem in catalog.validate() {
            tracing::warn!("Exercise file problem: {}", problem);
        }
        Ok(catalog)
    }

    pub fn save_catalog(&self, catalog: &ExerciseCatalog) -> Result<()> {
        save_json(&self.exercises_path(), catalog)?;
        tracing::debug!("Saved {} exercises", catalog.len());
        Ok(())
    }

    /// Load the catalog, seeding and saving the starter set when it is empty
    pub fn load_or_seed_catalog(&self) -> Result<ExerciseCatalog> {
        let catalog = self.load_catalog()?;
        if !catalog.is_empty() {
            return Ok(catalog);
        }

        let seeded = ExerciseCatalog::with_defaults();
        self.save_catalog(&seeded)?;
        tracing::info!("Seeded {} default exercises", seeded.len());
        Ok(seeded)
    }

    /// Load settings with defaults filled in for missing keys
    pub fn load_settings(&self) -> Result<Settings> {
        let mut settings: Settings = load_json_or_default(&self.settings_path())?;
        for (key, value) in default_settings() {
            settings.entry(key).or_insert(value);
        }
        Ok(settings)
    }

    pub fn save_settings(&self, settings: &Settings) -> Result<()> {
        save_json(&self.settings_path(), settings)
    }

    /// Set one setting, rejecting non-primitive values
    pub fn set_setting(&self, key: &str, value: Value) -> Result<Settings> {
        if key.trim().is_empty() {
            return Err(Error::Other("setting key must not be empty".into()));
        }
        if value.is_array() || value.is_object() {
            return Err(Error::Other(format!(
                "setting '{}' must be a string, number, boolean or null",
                key
            )));
        }

        let mut settings = self.load_settings()?;
        settings.insert(key.to_string(), value);
        self.save_settings(&settings)?;
        Ok(settings)
    }

    pub fn load_history(&self) -> Result<Vec<WorkoutSnapshot>> {
        history::load_history(&self.history_path())
    }

    /// Snapshot a completed workout into the history log
    pub fn record_completion(&self, workout: &Workout, limit: usize) -> Result<WorkoutSnapshot> {
        history::record_completion(&self.history_path(), workout, limit)
    }

    pub fn clear_history(&self) -> Result<()> {
        history::clear_history(&self.history_path())
    }
}

/// Read JSON from `path` under a shared lock
///
/// Returns `T::default()` if the file is missing. If it cannot be opened,
/// locked, read or parsed, logs a warning and returns the default.
pub(crate) fn load_json_or_default<T>(path: &Path) -> Result<T>
where
    T: DeserializeOwned + Default,
{
    if !path.exists() {
        tracing::debug!("No file at {:?}, using defaults", path);
        return Ok(T::default());
    }

    let file = match File::open(path) {
        Ok(f) => f,
        Err(e) => {
            tracing::warn!("Unable to open {:?}: {}. Using defaults.", path, e);
            return Ok(T::default());
        }
    };

    if let Err(e) = file.lock_shared() {
        tracing::warn!("Unable to lock {:?}: {}. Using defaults.", path, e);
        return Ok(T::default());
    }

    let mut contents = String::new();
    let read = std::io::BufReader::new(&file).read_to_string(&mut contents);
    file.unlock()?;

    if let Err(e) = read {
        tracing::warn!("Failed to read {:?}: {}. Using defaults.", path, e);
        return Ok(T::default());
    }

    match serde_json::from_str::<T>(&contents) {
        Ok(value) => {
            tracing::debug!("Loaded {:?}", path);
            Ok(value)
        }
        Err(e) => {
            tracing::warn!("Failed to parse {:?}: {}. Using defaults.", path, e);
            Ok(T::default())
        }
    }
}

/// Atomically write `value` as pretty JSON to `path`
pub(crate) fn save_json<T>(path: &Path, value: &T) -> Result<()>
where
    T: Serialize + ?Sized,
{
    let parent = path.parent().ok_or_else(|| {
        std::io::Error::new(std::io::ErrorKind::Other, "data path missing parent")
    })?;
    std::fs::create_dir_all(parent)?;

    let temp = NamedTempFile::new_in(parent)?;
    temp.as_file().lock_exclusive()?;

    {
        let mut writer = std::io::BufWriter::new(temp.as_file());
        serde_json::to_writer_pretty(&mut writer, value)?;
        writer.write_all(b"\n")?;
        writer.flush()?;
    }

    temp.as_file().sync_all()?;
    temp.as_file().unlock()?;
    temp.persist(path).map_err(|e| Error::Io(e.error))?;

    tracing::debug!("Wrote {:?}", path);
    Ok(())
}
