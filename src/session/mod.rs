//! Ingestion Sessions
//!
//! One session drives one file through selection, preview, schema
//! validation, and simulated transfer, as specified in INGEST.md.
//! State transitions live in `state`, the orchestration in
//! `controller`, and the pluggable edges (where the file comes from,
//! where the progress goes) in `source` and `transport`.

mod controller;
mod errors;
mod receipt;
mod source;
mod state;
mod transport;

pub use controller::IngestionSession;
pub use errors::{SessionError, SessionResult, UPLOAD_FAILED_MESSAGE};
pub use receipt::{compute_checksum, UploadReceipt};
pub use source::{FileSource, MemorySource, UploadSource};
pub use state::SessionState;
pub use transport::{MemoryTransport, TimedTransport, UploadTransport};
