//! Custom error types for Aureon
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions. The aggregation functions in
//! [`crate::reports`] never return these; they are used by the layers around
//! them (configuration, report sources, export, CLI).

use thiserror::Error;

/// The main error type for Aureon operations
#[derive(Error, Debug)]
pub enum AureonError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Invalid user input (periods, dates, hotel names)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// A report source failed to answer a query
    #[error("Report source error: {0}")]
    Source(String),

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),
}

impl AureonError {
    /// Create a "not found" error for hotels
    pub fn hotel_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Hotel",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

impl From<std::io::Error> for AureonError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for AureonError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for Aureon operations
pub type AureonResult<T> = Result<T, AureonError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = AureonError::Config("test error".into());
        assert_eq!(err.to_string(), "Configuration error: test error");
    }

    #[test]
    fn test_not_found_error() {
        let err = AureonError::hotel_not_found("Mbolo Hotel");
        assert_eq!(err.to_string(), "Hotel not found: Mbolo Hotel");
        assert!(err.is_not_found());
        assert!(!err.is_validation());
    }

    #[test]
    fn test_source_error() {
        let err = AureonError::Source("connection refused".into());
        assert_eq!(err.to_string(), "Report source error: connection refused");
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: AureonError = io_err.into();
        assert!(matches!(err, AureonError::Io(_)));
    }
}
