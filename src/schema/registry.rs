//! Dataset schema registry
//!
//! Per SCHEMAS.md §5-6:
//! - The built-in catalogue is always available via `builtin()`
//! - Extra schemas load from a directory of JSON files at startup
//! - Registration is immutable: re-registering an ID is an error

use std::collections::HashMap;
use std::path::Path;

use crate::config::IngestConfig;
use crate::observability::{log_event_with_fields, Event};

use super::catalog::builtin_schemas;
use super::errors::{SchemaError, SchemaResult};
use super::types::DatasetSchema;

/// Registry of dataset schemas indexed by dataset ID.
pub struct SchemaRegistry {
    schemas: HashMap<String, DatasetSchema>,
}

impl SchemaRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            schemas: HashMap::new(),
        }
    }

    /// Creates a registry pre-populated with the built-in catalogue.
    pub fn builtin() -> Self {
        let mut schemas = HashMap::new();
        for schema in builtin_schemas() {
            schemas.insert(schema.dataset_id.clone(), schema);
        }

        let count = schemas.len().to_string();
        log_event_with_fields(
            Event::SchemasLoaded,
            &[("count", count.as_str()), ("source", "builtin")],
        );

        Self { schemas }
    }

    /// Creates a registry from the ingestion config: the built-in
    /// catalogue plus any schemas in the configured directory.
    ///
    /// # Errors
    ///
    /// Fails fatally if `schema_dir` is set but unreadable, or if any
    /// schema in it is malformed, invalid, or a duplicate.
    pub fn from_config(config: &IngestConfig) -> SchemaResult<Self> {
        let mut registry = Self::builtin();
        if let Some(dir) = &config.schema_dir {
            registry.load_dir(dir)?;
        }
        Ok(registry)
    }

    /// Registers a schema.
    ///
    /// # Errors
    ///
    /// - `DOCK_INVALID_SCHEMA` if the schema fails structural validation
    /// - `DOCK_DUPLICATE_DATASET` if the ID is already registered
    pub fn register(&mut self, schema: DatasetSchema) -> SchemaResult<()> {
        schema
            .validate_structure()
            .map_err(|reason| SchemaError::invalid_schema(&schema.dataset_id, reason))?;

        if self.schemas.contains_key(&schema.dataset_id) {
            return Err(SchemaError::duplicate_dataset(&schema.dataset_id));
        }

        self.schemas.insert(schema.dataset_id.clone(), schema);
        Ok(())
    }

    /// Loads all schema files from a directory.
    ///
    /// Non-JSON files are skipped. Returns the number of schemas loaded.
    ///
    /// # Errors
    ///
    /// - `DOCK_MALFORMED_SCHEMA` for unreadable files or invalid JSON
    /// - `DOCK_INVALID_SCHEMA` / `DOCK_DUPLICATE_DATASET` from registration
    pub fn load_dir(&mut self, dir: &Path) -> SchemaResult<usize> {
        let entries = std::fs::read_dir(dir).map_err(|e| {
            SchemaError::malformed_schema(
                dir.display().to_string(),
                format!("Failed to read schema directory: {}", e),
            )
        })?;

        let mut loaded = 0;
        for entry in entries {
            let entry = entry.map_err(|e| {
                SchemaError::malformed_schema(
                    dir.display().to_string(),
                    format!("Failed to read directory entry: {}", e),
                )
            })?;

            let path = entry.path();

            // Skip non-JSON files
            if path.extension().map_or(true, |ext| ext != "json") {
                continue;
            }

            self.load_schema_file(&path)?;
            loaded += 1;
        }

        let count = loaded.to_string();
        let dir_display = dir.display().to_string();
        log_event_with_fields(
            Event::SchemasLoaded,
            &[("count", count.as_str()), ("source", dir_display.as_str())],
        );

        Ok(loaded)
    }

    /// Loads a single schema file.
    fn load_schema_file(&mut self, path: &Path) -> SchemaResult<()> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            SchemaError::malformed_schema(
                path.display().to_string(),
                format!("Failed to read file: {}", e),
            )
        })?;

        let schema: DatasetSchema = serde_json::from_str(&content).map_err(|e| {
            SchemaError::malformed_schema(path.display().to_string(), format!("Invalid JSON: {}", e))
        })?;

        self.register(schema)
    }

    /// Gets a schema by dataset ID.
    pub fn get(&self, dataset_id: &str) -> Option<&DatasetSchema> {
        self.schemas.get(dataset_id)
    }

    /// Gets a schema by dataset ID, failing with `DOCK_UNKNOWN_DATASET`.
    pub fn require(&self, dataset_id: &str) -> SchemaResult<&DatasetSchema> {
        self.get(dataset_id)
            .ok_or_else(|| SchemaError::unknown_dataset(dataset_id))
    }

    /// Checks if a dataset ID is registered.
    pub fn contains(&self, dataset_id: &str) -> bool {
        self.schemas.contains_key(dataset_id)
    }

    /// Returns all registered schemas.
    pub fn all_schemas(&self) -> impl Iterator<Item = &DatasetSchema> {
        self.schemas.values()
    }

    /// Returns the number of registered schemas.
    pub fn schema_count(&self) -> usize {
        self.schemas.len()
    }
}

impl Default for SchemaRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::super::types::FieldSpec;
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn sample_schema() -> DatasetSchema {
        DatasetSchema::new(
            "orders",
            "Orders",
            "Order lines",
            vec![
                FieldSpec::string("order_id", "O001"),
                FieldSpec::number("total", "120"),
            ],
        )
    }

    #[test]
    fn test_register_and_get() {
        let mut registry = SchemaRegistry::new();
        registry.register(sample_schema()).unwrap();

        let schema = registry.get("orders");
        assert!(schema.is_some());
        assert_eq!(schema.unwrap().name, "Orders");
    }

    #[test]
    fn test_duplicate_registration_rejected() {
        let mut registry = SchemaRegistry::new();
        registry.register(sample_schema()).unwrap();

        let result = registry.register(sample_schema());
        assert!(result.is_err());
        assert_eq!(
            result.unwrap_err().code().code(),
            "DOCK_DUPLICATE_DATASET"
        );
    }

    #[test]
    fn test_invalid_schema_rejected() {
        let mut registry = SchemaRegistry::new();
        let schema = DatasetSchema::new("bad", "Bad", "", vec![]);

        let result = registry.register(schema);
        assert!(result.is_err());
        assert_eq!(result.unwrap_err().code().code(), "DOCK_INVALID_SCHEMA");
    }

    #[test]
    fn test_builtin_registry() {
        let registry = SchemaRegistry::builtin();
        assert_eq!(registry.schema_count(), 8);
        assert!(registry.contains("inventory_data"));
        assert!(registry.contains("sales_data"));
        assert!(!registry.contains("orders"));
    }

    #[test]
    fn test_require_unknown_dataset() {
        let registry = SchemaRegistry::builtin();
        let result = registry.require("nonexistent");
        assert!(result.is_err());
        assert_eq!(result.unwrap_err().code().code(), "DOCK_UNKNOWN_DATASET");
    }

    #[test]
    fn test_load_dir() {
        let temp_dir = TempDir::new().unwrap();
        let schema_json = serde_json::to_string(&sample_schema()).unwrap();
        fs::write(temp_dir.path().join("orders.json"), schema_json).unwrap();
        fs::write(temp_dir.path().join("notes.txt"), "not a schema").unwrap();

        let mut registry = SchemaRegistry::new();
        let loaded = registry.load_dir(temp_dir.path()).unwrap();

        assert_eq!(loaded, 1);
        assert!(registry.contains("orders"));
    }

    #[test]
    fn test_load_dir_invalid_json() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("broken.json"), "{ nope").unwrap();

        let mut registry = SchemaRegistry::new();
        let result = registry.load_dir(temp_dir.path());
        assert!(result.is_err());
        assert_eq!(
            result.unwrap_err().code().code(),
            "DOCK_MALFORMED_SCHEMA"
        );
    }

    #[test]
    fn test_load_dir_missing_directory() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("absent");

        let mut registry = SchemaRegistry::new();
        let result = registry.load_dir(&missing);
        assert!(result.is_err());
        assert!(result.unwrap_err().is_fatal());
    }

    #[test]
    fn test_from_config_with_schema_dir() {
        let temp_dir = TempDir::new().unwrap();
        let schema_json = serde_json::to_string(&sample_schema()).unwrap();
        fs::write(temp_dir.path().join("orders.json"), schema_json).unwrap();

        let config = IngestConfig {
            schema_dir: Some(temp_dir.path().to_path_buf()),
            ..Default::default()
        };
        let registry = SchemaRegistry::from_config(&config).unwrap();

        assert_eq!(registry.schema_count(), 9);
        assert!(registry.contains("orders"));
    }

    #[test]
    fn test_from_config_without_schema_dir() {
        let registry = SchemaRegistry::from_config(&IngestConfig::default()).unwrap();
        assert_eq!(registry.schema_count(), 8);
    }

    #[test]
    fn test_load_dir_duplicate_of_builtin() {
        let temp_dir = TempDir::new().unwrap();
        let clash = DatasetSchema::new(
            "users",
            "Users Again",
            "",
            vec![FieldSpec::string("user_id", "U1")],
        );
        let schema_json = serde_json::to_string(&clash).unwrap();
        fs::write(temp_dir.path().join("users.json"), schema_json).unwrap();

        let mut registry = SchemaRegistry::builtin();
        let result = registry.load_dir(temp_dir.path());
        assert!(result.is_err());
        assert_eq!(
            result.unwrap_err().code().code(),
            "DOCK_DUPLICATE_DATASET"
        );
    }
}
