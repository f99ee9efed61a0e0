//! Schema error types following ERRORS.md
//!
//! Error codes:
//! - DOCK_EMPTY_FILE (REJECT)
//! - DOCK_SCHEMA_MISMATCH (REJECT)
//! - DOCK_UNKNOWN_DATASET (REJECT)
//! - DOCK_DUPLICATE_DATASET (REJECT)
//! - DOCK_INVALID_SCHEMA (FATAL)
//! - DOCK_MALFORMED_SCHEMA (FATAL)

use std::fmt;

/// Severity levels for schema errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Input rejected, caller may retry with corrected input
    Reject,
    /// Startup cannot proceed (registry construction failures)
    Fatal,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Reject => write!(f, "REJECT"),
            Severity::Fatal => write!(f, "FATAL"),
        }
    }
}

/// Schema-specific error codes as defined in ERRORS.md
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaErrorCode {
    /// File parsed to zero data rows
    DockEmptyFile,
    /// Header is missing required columns
    DockSchemaMismatch,
    /// Dataset ID not found in the registry
    DockUnknownDataset,
    /// Attempt to register an already-registered dataset ID
    DockDuplicateDataset,
    /// Schema definition fails its own structural rules
    DockInvalidSchema,
    /// Schema file unreadable or not valid JSON
    DockMalformedSchema,
}

impl SchemaErrorCode {
    /// Returns the string code as defined in ERRORS.md
    pub fn code(&self) -> &'static str {
        match self {
            SchemaErrorCode::DockEmptyFile => "DOCK_EMPTY_FILE",
            SchemaErrorCode::DockSchemaMismatch => "DOCK_SCHEMA_MISMATCH",
            SchemaErrorCode::DockUnknownDataset => "DOCK_UNKNOWN_DATASET",
            SchemaErrorCode::DockDuplicateDataset => "DOCK_DUPLICATE_DATASET",
            SchemaErrorCode::DockInvalidSchema => "DOCK_INVALID_SCHEMA",
            SchemaErrorCode::DockMalformedSchema => "DOCK_MALFORMED_SCHEMA",
        }
    }

    /// Returns the severity level for this error
    pub fn severity(&self) -> Severity {
        match self {
            SchemaErrorCode::DockInvalidSchema | SchemaErrorCode::DockMalformedSchema => {
                Severity::Fatal
            }
            _ => Severity::Reject,
        }
    }
}

impl fmt::Display for SchemaErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Schema error type with full context
#[derive(Debug, Clone)]
pub struct SchemaError {
    /// Error code
    code: SchemaErrorCode,
    /// Human-readable message (user-facing for validation errors)
    message: String,
    /// Dataset ID if applicable
    dataset_id: Option<String>,
    /// Missing column names in schema declaration order, for mismatches
    missing_columns: Vec<String>,
}

impl SchemaError {
    /// Create an empty file error
    ///
    /// Raised when a file parses to zero data rows; distinct from a
    /// header mismatch.
    pub fn empty_file() -> Self {
        Self {
            code: SchemaErrorCode::DockEmptyFile,
            message: "No data found in file".into(),
            dataset_id: None,
            missing_columns: Vec::new(),
        }
    }

    /// Create a schema mismatch error
    ///
    /// `missing_columns` must already be in schema declaration order.
    pub fn schema_mismatch(dataset_id: impl Into<String>, missing_columns: Vec<String>) -> Self {
        Self {
            code: SchemaErrorCode::DockSchemaMismatch,
            message: format!("Missing required columns: {}", missing_columns.join(", ")),
            dataset_id: Some(dataset_id.into()),
            missing_columns,
        }
    }

    /// Create an unknown dataset error
    pub fn unknown_dataset(dataset_id: impl Into<String>) -> Self {
        let id = dataset_id.into();
        Self {
            code: SchemaErrorCode::DockUnknownDataset,
            message: format!("Dataset '{}' not found", id),
            dataset_id: Some(id),
            missing_columns: Vec::new(),
        }
    }

    /// Create a duplicate dataset error
    pub fn duplicate_dataset(dataset_id: impl Into<String>) -> Self {
        let id = dataset_id.into();
        Self {
            code: SchemaErrorCode::DockDuplicateDataset,
            message: format!("Dataset '{}' is already registered", id),
            dataset_id: Some(id),
            missing_columns: Vec::new(),
        }
    }

    /// Create an invalid schema error (FATAL)
    pub fn invalid_schema(dataset_id: impl Into<String>, reason: impl Into<String>) -> Self {
        let id = dataset_id.into();
        Self {
            code: SchemaErrorCode::DockInvalidSchema,
            message: format!("Schema for dataset '{}' is invalid: {}", id, reason.into()),
            dataset_id: Some(id),
            missing_columns: Vec::new(),
        }
    }

    /// Create an error for a malformed schema file (FATAL)
    pub fn malformed_schema(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            code: SchemaErrorCode::DockMalformedSchema,
            message: format!(
                "Malformed schema file '{}': {}",
                path.into(),
                reason.into()
            ),
            dataset_id: None,
            missing_columns: Vec::new(),
        }
    }

    /// Returns the error code
    pub fn code(&self) -> SchemaErrorCode {
        self.code
    }

    /// Returns the severity level
    pub fn severity(&self) -> Severity {
        self.code.severity()
    }

    /// Returns the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the dataset ID if applicable
    pub fn dataset_id(&self) -> Option<&str> {
        self.dataset_id.as_deref()
    }

    /// Returns the missing columns in schema declaration order
    pub fn missing_columns(&self) -> &[String] {
        &self.missing_columns
    }

    /// Returns whether this is a fatal error
    pub fn is_fatal(&self) -> bool {
        self.severity() == Severity::Fatal
    }
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {}: {}",
            self.code.severity(),
            self.code.code(),
            self.message
        )
    }
}

impl std::error::Error for SchemaError {}

/// Result type for schema operations
pub type SchemaResult<T> = Result<T, SchemaError>;
