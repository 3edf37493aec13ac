//! Model error types.

use chrono::NaiveDateTime;
use thiserror::Error;

/// Errors from artifact parsing and prediction.
#[derive(Debug, Clone, Error)]
pub enum ModelError {
    /// Artifact JSON could not be parsed or is internally inconsistent
    #[error("Invalid model artifact: {0}")]
    InvalidArtifact(String),

    /// Unrecognised sampling frequency string
    #[error("Invalid frequency '{0}'")]
    InvalidFrequency(String),

    /// Timestamp string could not be parsed
    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),

    /// A declared regressor has no value for a future row
    #[error("Missing regressor '{column}' at {ds}")]
    MissingRegressor { column: String, ds: NaiveDateTime },

    /// Prediction was invoked on an empty index
    #[error("Future index is empty")]
    EmptyIndex,
}

/// Result type for model operations.
pub type Result<T> = std::result::Result<T, ModelError>;
