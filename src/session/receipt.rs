//! Upload receipts

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Proof of a completed upload
///
/// The checksum is the SHA-256 of the raw file text, so a caller can
/// later verify what was ingested against the file it still holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadReceipt {
    /// Data rows ingested, excluding the header
    pub rows_ingested: u64,
    /// Hex-encoded SHA-256 of the file content
    pub checksum: String,
    /// When the upload settled
    pub completed_at: DateTime<Utc>,
}

impl UploadReceipt {
    /// Issue a receipt for the given content.
    pub fn new(rows_ingested: u64, content: &str) -> Self {
        Self {
            rows_ingested,
            checksum: compute_checksum(content),
            completed_at: Utc::now(),
        }
    }
}

/// Compute the hex-encoded SHA-256 of file content.
pub fn compute_checksum(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    format!("{:x}", hasher.finalize())
}
