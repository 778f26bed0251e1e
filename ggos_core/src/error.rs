//! Error types for the ggos_core library.

use std::io;
use uuid::Uuid;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for ggos_core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An exercise with the same name (case-insensitive) already exists
    #[error("An exercise named '{0}' already exists")]
    DuplicateName(String),

    /// No exercise with the given id exists in the catalog
    #[error("No exercise with id {0}")]
    NotFound(Uuid),

    /// Exercise fields failed validation (empty name, zero amount)
    #[error("Invalid exercise: {0}")]
    InvalidExercise(String),

    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}
