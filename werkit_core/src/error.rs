//! Error types for the werkit_core library.

use std::io;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for werkit_core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Unrecognized keyword/action, or arguments of the wrong shape
    #[error("Invalid command: {0}")]
    InvalidCommand(String),

    /// Exercise reference does not resolve, or exercise data is unusable
    #[error("Invalid exercise: {0}")]
    InvalidExercise(String),

    /// Workout reference does not resolve
    #[error("Invalid workout: {0}")]
    InvalidWorkout(String),

    /// Plan reference does not resolve, or plan data is unusable
    #[error("Invalid plan: {0}")]
    InvalidPlan(String),

    /// Day number outside 1..=7
    #[error("Invalid day: {0}")]
    InvalidDay(String),

    /// Non-numeric or out-of-range scalar (reps, names, indices)
    #[error("Invalid value: {0}")]
    InvalidValue(String),

    /// Deletion refused because another list still points at the entry
    #[error("{entity} {index} is still used by {referrer}")]
    ReferencedEntityInUse {
        entity: &'static str,
        index: usize,
        referrer: String,
    },

    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Persistence collaborator error
    #[error("Persistence error: {0}")]
    Persistence(String),
}
