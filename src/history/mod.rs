//! Upload History
//!
//! Append-only ledger of finished uploads, one record per attempt.
//! See INGEST.md §5 for how sessions feed it and OBSERVABILITY.md §4
//! for the file format.

mod log;
mod record;

pub use log::{FileUploadLog, HistoryError, HistoryResult, MemoryUploadLog, UploadLog};
pub use record::{UploadRecord, UploadStatus};
