//! Error types for the ovuflow_core library.

use std::io;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for ovuflow_core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
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

    /// Start date was not a `YYYY-MM-DD` calendar date
    #[error("Invalid date {0:?}: please enter a valid date in YYYY-MM-DD format")]
    InvalidDate(String),

    /// Cycle length was not a positive whole number of days
    #[error("Invalid cycle length {0:?}: please enter a valid number for cycle length")]
    InvalidCycleLength(String),

    /// Health condition name not in the known set
    #[error("Unknown health condition: {0:?} (expected normal, pcos or thyroid-issues)")]
    UnknownHealthCondition(String),

    /// Exercise level name not in the known set
    #[error("Unknown exercise level: {0:?} (expected very-active, normal or sedentary)")]
    UnknownExerciseLevel(String),

    /// Saved record file could not be understood
    #[error("Record error: {0}")]
    Record(String),
}

impl Error {
    /// True for errors caused by bad user input rather than the environment
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Error::InvalidDate(_)
                | Error::InvalidCycleLength(_)
                | Error::UnknownHealthCondition(_)
                | Error::UnknownExerciseLevel(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_classification() {
        assert!(Error::InvalidDate("x".into()).is_validation());
        assert!(Error::InvalidCycleLength("0".into()).is_validation());
        assert!(Error::UnknownHealthCondition("flu".into()).is_validation());
        assert!(!Error::Record("bad".into()).is_validation());
        assert!(!Error::Config("bad".into()).is_validation());
    }

    #[test]
    fn test_messages_are_descriptive() {
        let msg = Error::InvalidDate("2024-13-01".into()).to_string();
        assert!(msg.contains("YYYY-MM-DD"));
        assert!(msg.contains("2024-13-01"));

        let msg = Error::InvalidCycleLength("abc".into()).to_string();
        assert!(msg.contains("cycle length"));
    }
}
