//! Upload history records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Outcome of a recorded upload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UploadStatus {
    Succeeded,
    Failed,
}

impl UploadStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            UploadStatus::Succeeded => "succeeded",
            UploadStatus::Failed => "failed",
        }
    }
}

impl std::fmt::Display for UploadStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One entry in the upload history
///
/// Every finished upload produces a record, succeeded or failed, so
/// the history answers "what was uploaded, when, and did it land".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadRecord {
    /// Unique id for this record
    pub id: Uuid,
    /// Session the upload ran in, for correlating with logs
    pub session_id: Uuid,
    /// Name of the uploaded file
    pub file_name: String,
    /// Dataset the file was uploaded into
    pub dataset_id: String,
    /// Whether the upload landed
    pub status: UploadStatus,
    /// Data rows ingested; zero for failed uploads
    pub rows_ingested: u64,
    /// User-facing failure message, present only on failed records
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    /// When the upload finished
    pub completed_at: DateTime<Utc>,
}

impl UploadRecord {
    /// Record a successful upload.
    pub fn succeeded(
        session_id: Uuid,
        file_name: impl Into<String>,
        dataset_id: impl Into<String>,
        rows_ingested: u64,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            session_id,
            file_name: file_name.into(),
            dataset_id: dataset_id.into(),
            status: UploadStatus::Succeeded,
            rows_ingested,
            error_message: None,
            completed_at: Utc::now(),
        }
    }

    /// Record a failed upload.
    pub fn failed(
        session_id: Uuid,
        file_name: impl Into<String>,
        dataset_id: impl Into<String>,
        error_message: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            session_id,
            file_name: file_name.into(),
            dataset_id: dataset_id.into(),
            status: UploadStatus::Failed,
            rows_ingested: 0,
            error_message: Some(error_message.into()),
            completed_at: Utc::now(),
        }
    }
}
