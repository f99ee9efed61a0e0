//! datadock - schema-validated tabular file ingestion
//!
//! A dataset-schema registry, a preview-capped CSV parser, a header
//! validator, and an ingestion session state machine with simulated
//! transfer progress and an upload-history ledger.

pub mod config;
pub mod history;
pub mod observability;
pub mod schema;
pub mod session;
pub mod tabular;
