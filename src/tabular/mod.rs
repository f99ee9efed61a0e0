//! Tabular parsing subsystem for datadock
//!
//! Per INGEST.md §3: raw comma-delimited text becomes a preview-capped
//! sequence of `ParsedRow`s. Parsing is total and pure; validation is a
//! separate concern (see `crate::schema`).

mod parser;
mod row;

pub use parser::{count_data_rows, parse};
pub use row::ParsedRow;
