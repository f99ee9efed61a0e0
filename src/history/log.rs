//! Upload history ledgers
//!
//! A ledger is append-only: one JSON line per finished upload, flushed
//! on every append so a crash loses at most the record being written.
//! `FileUploadLog` persists the history; `MemoryUploadLog` keeps it in
//! memory for tests and short-lived sessions.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use thiserror::Error;

use super::record::UploadRecord;

/// Result type for history operations
pub type HistoryResult<T> = Result<T, HistoryError>;

/// Upload history errors
#[derive(Debug, Clone, Error)]
pub enum HistoryError {
    #[error("Failed to write upload history: {0}")]
    Io(String),

    #[error("Failed to encode upload record: {0}")]
    Encode(String),
}

/// Append-only sink for upload records
pub trait UploadLog: Send + Sync {
    /// Append one record to the ledger.
    fn append(&self, record: &UploadRecord) -> HistoryResult<()>;
}

/// Ledger backed by a JSON-lines file
pub struct FileUploadLog {
    path: PathBuf,
    writer: Arc<Mutex<BufWriter<File>>>,
}

impl FileUploadLog {
    /// Open a ledger file, creating it if needed. Existing records are
    /// kept; new ones are appended after them.
    pub fn open(path: impl AsRef<Path>) -> HistoryResult<Self> {
        let path = path.as_ref().to_path_buf();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| HistoryError::Io(e.to_string()))?;
        Ok(Self {
            path,
            writer: Arc::new(Mutex::new(BufWriter::new(file))),
        })
    }

    /// Get the ledger file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read every record back from the ledger file.
    pub fn records(&self) -> HistoryResult<Vec<UploadRecord>> {
        let text =
            std::fs::read_to_string(&self.path).map_err(|e| HistoryError::Io(e.to_string()))?;
        text.lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| {
                serde_json::from_str(line).map_err(|e| HistoryError::Encode(e.to_string()))
            })
            .collect()
    }
}

impl UploadLog for FileUploadLog {
    fn append(&self, record: &UploadRecord) -> HistoryResult<()> {
        let line =
            serde_json::to_string(record).map_err(|e| HistoryError::Encode(e.to_string()))?;
        let mut writer = self.writer.lock().unwrap();
        writeln!(writer, "{}", line).map_err(|e| HistoryError::Io(e.to_string()))?;
        writer.flush().map_err(|e| HistoryError::Io(e.to_string()))?;
        Ok(())
    }
}

/// In-memory ledger for tests
#[derive(Debug, Clone, Default)]
pub struct MemoryUploadLog {
    records: Arc<Mutex<Vec<UploadRecord>>>,
}

impl MemoryUploadLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a copy of all records appended so far.
    pub fn records(&self) -> Vec<UploadRecord> {
        self.records.lock().unwrap().clone()
    }

    pub fn len(&self) -> usize {
        self.records.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl UploadLog for MemoryUploadLog {
    fn append(&self, record: &UploadRecord) -> HistoryResult<()> {
        self.records.lock().unwrap().push(record.clone());
        Ok(())
    }
}
