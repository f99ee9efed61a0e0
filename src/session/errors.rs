//! Ingestion session error types
//!
//! Per ERRORS.md §3, session errors split two ways: domain failures
//! (bad file, failed validation, failed transfer) land the session in
//! the `Error` state with a user-facing message, while sequencing
//! misuse (calls the current state does not permit) is an `Err` that
//! leaves the session untouched.

use thiserror::Error;

use crate::config::ConfigError;
use crate::schema::SchemaError;

/// Result type for session operations
pub type SessionResult<T> = Result<T, SessionError>;

/// Message shown when an upload aborts for a non-validation reason
pub const UPLOAD_FAILED_MESSAGE: &str = "Upload failed. Please try again.";

/// Ingestion session errors
#[derive(Debug, Clone, Error)]
pub enum SessionError {
    #[error("Please select a valid CSV file")]
    InvalidFileType { file_name: String },

    #[error("File size must be less than {}MB", .limit_bytes / (1024 * 1024))]
    FileTooLarge { size_bytes: u64, limit_bytes: u64 },

    #[error("forbidden transition: {from} → {to}")]
    ForbiddenTransition {
        from: &'static str,
        to: &'static str,
    },

    #[error("No file selected")]
    NoFileSelected,

    #[error("Failed to read '{file_name}': {reason}")]
    Source { file_name: String, reason: String },

    #[error("{}", UPLOAD_FAILED_MESSAGE)]
    Transport { reason: String },

    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl SessionError {
    /// Create a forbidden transition error.
    pub fn forbidden_transition(from: &'static str, to: &'static str) -> Self {
        Self::ForbiddenTransition { from, to }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_file_type_message() {
        let err = SessionError::InvalidFileType {
            file_name: "data.txt".into(),
        };
        assert_eq!(err.to_string(), "Please select a valid CSV file");
    }

    #[test]
    fn test_file_too_large_renders_limit_in_mb() {
        let err = SessionError::FileTooLarge {
            size_bytes: 50 * 1024 * 1024 + 1,
            limit_bytes: 50 * 1024 * 1024,
        };
        assert_eq!(err.to_string(), "File size must be less than 50MB");
    }

    #[test]
    fn test_forbidden_transition_message() {
        let err = SessionError::forbidden_transition("Uploading", "Selected");
        assert_eq!(
            err.to_string(),
            "forbidden transition: Uploading → Selected"
        );
    }

    #[test]
    fn test_transport_message() {
        let err = SessionError::Transport {
            reason: "connection reset".into(),
        };
        assert_eq!(err.to_string(), UPLOAD_FAILED_MESSAGE);
    }

    #[test]
    fn test_schema_error_passes_through() {
        let err = SessionError::from(SchemaError::empty_file());
        assert!(err.to_string().contains("No data found in file"));
    }
}
