//! Data loading error types.

use thiserror::Error;

/// Errors from loading the artifact bundle and external tables.
#[derive(Debug, Clone, Error)]
pub enum DataError {
    /// File missing or unreadable
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// CSV structure or record error
    #[error("Failed to parse CSV: {0}")]
    CsvError(String),

    /// JSON document error
    #[error("Failed to parse JSON: {0}")]
    JsonError(String),

    /// A required column is absent from a tabular file
    #[error("Missing column '{column}' in {file}")]
    MissingColumn { column: String, file: String },

    /// A cell value could not be interpreted
    #[error("Invalid value in row {row}: {reason}")]
    InvalidRow { row: usize, reason: String },

    /// Model artifact failed deserialization or validation
    #[error("Invalid model artifact: {0}")]
    Artifact(String),

    /// File parsed but contained no data rows
    #[error("No data rows in {0}")]
    Empty(String),
}

/// Result type for data operations.
pub type Result<T> = std::result::Result<T, DataError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_column_message() {
        let error = DataError::MissingColumn {
            column: "Datetime".to_string(),
            file: "weather_holiday.csv".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Missing column 'Datetime' in weather_holiday.csv"
        );
    }

    #[test]
    fn test_invalid_row_message() {
        let error = DataError::InvalidRow {
            row: 3,
            reason: "bad timestamp".to_string(),
        };
        assert_eq!(error.to_string(), "Invalid value in row 3: bad timestamp");
    }

    #[test]
    fn test_error_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<DataError>();
    }
}
