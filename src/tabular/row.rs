//! Parsed row representation
//!
//! Rows from one parse share a single header allocation. A row is
//! transient: it exists for preview and validation, never serialized.

use std::sync::Arc;

/// One data row: a shared ordered header slice plus one value per header.
///
/// The key set is exactly the header set. Values zip to headers
/// positionally; construction pads missing trailing values with empty
/// strings and drops values beyond the header count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedRow {
    headers: Arc<[String]>,
    values: Vec<String>,
}

impl ParsedRow {
    /// Creates a row, normalizing `values` to the header count.
    pub fn new(headers: Arc<[String]>, mut values: Vec<String>) -> Self {
        values.resize(headers.len(), String::new());
        Self { headers, values }
    }

    /// Returns the header names in file order.
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Returns the values in header order.
    pub fn values(&self) -> &[String] {
        &self.values
    }

    /// Returns the value for a header name.
    ///
    /// If the header repeats, the last occurrence wins.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .rposition(|h| h == name)
            .map(|i| self.values[i].as_str())
    }

    /// Checks whether a header name is present.
    pub fn has_column(&self, name: &str) -> bool {
        self.headers.iter().any(|h| h == name)
    }

    /// Returns the number of columns.
    pub fn len(&self) -> usize {
        self.headers.len()
    }

    /// Returns true if the row has no columns.
    pub fn is_empty(&self) -> bool {
        self.headers.is_empty()
    }
}
