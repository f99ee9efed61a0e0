//! Dataset schema definitions per SCHEMAS.md
//!
//! A dataset schema is an ordered list of required columns. Field kinds
//! are declared for display and documentation; header validation checks
//! names only (SCHEMAS.md §4).

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Declared column kinds as defined in SCHEMAS.md §2
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    /// Free-form UTF-8 text
    String,
    /// Numeric value
    Number,
    /// Calendar date or timestamp
    Date,
}

impl FieldKind {
    /// Returns the kind name for display
    pub fn kind_name(&self) -> &'static str {
        match self {
            FieldKind::String => "string",
            FieldKind::Number => "number",
            FieldKind::Date => "date",
        }
    }
}

/// One required column in a dataset schema
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    /// Column name, matched against file headers
    pub name: String,
    /// Declared kind
    #[serde(rename = "type")]
    pub kind: FieldKind,
    /// Example value for display
    #[serde(default)]
    pub example: String,
}

impl FieldSpec {
    /// Create a string field
    pub fn string(name: impl Into<String>, example: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: FieldKind::String,
            example: example.into(),
        }
    }

    /// Create a number field
    pub fn number(name: impl Into<String>, example: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: FieldKind::Number,
            example: example.into(),
        }
    }

    /// Create a date field
    pub fn date(name: impl Into<String>, example: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: FieldKind::Date,
            example: example.into(),
        }
    }
}

/// Complete dataset schema as per SCHEMAS.md §3
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetSchema {
    /// Unique dataset identifier
    pub dataset_id: String,
    /// Display name
    pub name: String,
    /// Short description of the dataset
    #[serde(default)]
    pub description: String,
    /// Required columns, in declaration order
    pub fields: Vec<FieldSpec>,
}

impl DatasetSchema {
    /// Create a new dataset schema
    pub fn new(
        dataset_id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        fields: Vec<FieldSpec>,
    ) -> Self {
        Self {
            dataset_id: dataset_id.into(),
            name: name.into(),
            description: description.into(),
            fields,
        }
    }

    /// Returns the required column names in declaration order
    pub fn column_names(&self) -> Vec<&str> {
        self.fields.iter().map(|f| f.name.as_str()).collect()
    }

    /// Returns the number of required columns
    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    /// Validates the schema structure itself (not a file)
    pub fn validate_structure(&self) -> Result<(), String> {
        if self.dataset_id.is_empty() {
            return Err("dataset_id must not be empty".into());
        }

        if self.fields.is_empty() {
            return Err("schema must declare at least one field".into());
        }

        let mut seen = HashSet::new();
        for field in &self.fields {
            if field.name.is_empty() {
                return Err("field names must not be empty".into());
            }
            if !seen.insert(field.name.as_str()) {
                return Err(format!("duplicate field name '{}'", field.name));
            }
        }

        Ok(())
    }
}
