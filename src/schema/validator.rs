//! Header validator per SCHEMAS.md §4
//!
//! Validation semantics:
//! - The file must contain at least one data row
//! - Every schema column must appear in the file header
//! - Extra columns are tolerated; column order is not enforced
//! - Missing columns are reported in schema declaration order
//!
//! Deliberately not checked (SCHEMAS.md §7): declared kinds, date
//! formats, duplicate IDs across rows.

use crate::tabular::ParsedRow;

use super::errors::{SchemaError, SchemaResult};
use super::registry::SchemaRegistry;
use super::types::DatasetSchema;

/// Header validator backed by a schema registry.
///
/// Validation is deterministic and does not mutate rows.
pub struct SchemaValidator<'a> {
    registry: &'a SchemaRegistry,
}

impl<'a> SchemaValidator<'a> {
    /// Creates a new validator backed by the given registry.
    pub fn new(registry: &'a SchemaRegistry) -> Self {
        Self { registry }
    }

    /// Validates parsed rows against a registered dataset schema.
    ///
    /// # Errors
    ///
    /// - `DOCK_UNKNOWN_DATASET` if the dataset ID is not registered
    /// - `DOCK_EMPTY_FILE` if there are no data rows
    /// - `DOCK_SCHEMA_MISMATCH` if required columns are missing
    pub fn validate_rows(&self, dataset_id: &str, rows: &[ParsedRow]) -> SchemaResult<()> {
        let schema = self.registry.require(dataset_id)?;
        Self::check_rows(schema, rows)
    }

    /// Validates parsed rows against a schema directly.
    ///
    /// Same semantics as `validate_rows`, without registry lookup.
    pub fn check_rows(schema: &DatasetSchema, rows: &[ParsedRow]) -> SchemaResult<()> {
        if rows.is_empty() {
            return Err(SchemaError::empty_file());
        }

        // The first row's key set is the file's column set.
        let first = &rows[0];
        let missing: Vec<String> = schema
            .fields
            .iter()
            .filter(|field| !first.has_column(&field.name))
            .map(|field| field.name.clone())
            .collect();

        if !missing.is_empty() {
            return Err(SchemaError::schema_mismatch(&schema.dataset_id, missing));
        }

        Ok(())
    }
}
