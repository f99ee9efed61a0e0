//! Schema subsystem for datadock
//!
//! Per SCHEMAS.md, a dataset schema names the columns an uploaded file
//! must carry. Schemas are registered at startup and immutable after.
//!
//! # Design Principles
//!
//! - Header validation before any transfer work
//! - Missing columns reported in schema declaration order
//! - Extra columns tolerated, column order not enforced
//! - Deterministic validation, no mutation

mod catalog;
mod errors;
mod registry;
mod types;
mod validator;

pub use catalog::builtin_schemas;
pub use errors::{SchemaError, SchemaErrorCode, SchemaResult, Severity};
pub use registry::SchemaRegistry;
pub use types::{DatasetSchema, FieldKind, FieldSpec};
pub use validator::SchemaValidator;
