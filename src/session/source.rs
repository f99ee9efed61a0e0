//! Upload sources
//!
//! A source is the file being offered to a session: a name, a declared
//! size, a content type, and the text itself. The selection gate looks
//! only at the metadata, so `read_text` is deferred until preview or
//! upload actually needs the content.

use std::fs;
use std::path::{Path, PathBuf};

use super::errors::{SessionError, SessionResult};

/// A file offered to an ingestion session
pub trait UploadSource {
    /// File name, including extension
    fn name(&self) -> &str;

    /// Declared size in bytes, checked against the configured cap
    fn size_bytes(&self) -> u64;

    /// MIME type, e.g. `text/csv`
    fn content_type(&self) -> &str;

    /// Read the full content as text.
    fn read_text(&self) -> SessionResult<String>;
}

/// Infer a MIME type from the file extension.
fn content_type_for(name: &str) -> &'static str {
    if name.ends_with(".csv") {
        "text/csv"
    } else if name.ends_with(".txt") {
        "text/plain"
    } else {
        "application/octet-stream"
    }
}

/// In-memory source for tests and embedded callers
#[derive(Debug, Clone)]
pub struct MemorySource {
    name: String,
    content_type: String,
    text: String,
    declared_size: Option<u64>,
}

impl MemorySource {
    /// Create a source from a name and its content, inferring the
    /// content type from the extension.
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        let name = name.into();
        let content_type = content_type_for(&name).to_string();
        Self {
            name,
            content_type,
            text: text.into(),
            declared_size: None,
        }
    }

    /// Override the inferred content type.
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = content_type.into();
        self
    }

    /// Declare a size different from the content length. Lets tests
    /// exercise the size cap without allocating the bytes.
    pub fn with_declared_size(mut self, size_bytes: u64) -> Self {
        self.declared_size = Some(size_bytes);
        self
    }
}

impl UploadSource for MemorySource {
    fn name(&self) -> &str {
        &self.name
    }

    fn size_bytes(&self) -> u64 {
        self.declared_size.unwrap_or(self.text.len() as u64)
    }

    fn content_type(&self) -> &str {
        &self.content_type
    }

    fn read_text(&self) -> SessionResult<String> {
        Ok(self.text.clone())
    }
}

/// Source backed by a file on disk
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
    name: String,
    size_bytes: u64,
    content_type: &'static str,
}

impl FileSource {
    /// Open a file as an upload source. Captures the size up front so
    /// the selection gate works without reading the content.
    pub fn open(path: impl AsRef<Path>) -> SessionResult<Self> {
        let path = path.as_ref().to_path_buf();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let metadata = fs::metadata(&path).map_err(|e| SessionError::Source {
            file_name: name.clone(),
            reason: e.to_string(),
        })?;
        let content_type = content_type_for(&name);
        Ok(Self {
            path,
            name,
            size_bytes: metadata.len(),
            content_type,
        })
    }

    /// Get the path this source reads from.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl UploadSource for FileSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn size_bytes(&self) -> u64 {
        self.size_bytes
    }

    fn content_type(&self) -> &str {
        self.content_type
    }

    fn read_text(&self) -> SessionResult<String> {
        fs::read_to_string(&self.path).map_err(|e| SessionError::Source {
            file_name: self.name.clone(),
            reason: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn test_memory_source_infers_content_type() {
        let source = MemorySource::new("sales.csv", "a,b\n1,2");
        assert_eq!(source.content_type(), "text/csv");
        assert_eq!(source.name(), "sales.csv");

        let source = MemorySource::new("notes.txt", "hello");
        assert_eq!(source.content_type(), "text/plain");

        let source = MemorySource::new("blob.bin", "data");
        assert_eq!(source.content_type(), "application/octet-stream");
    }

    #[test]
    fn test_memory_source_size_defaults_to_content_length() {
        let source = MemorySource::new("sales.csv", "a,b\n1,2");
        assert_eq!(source.size_bytes(), 7);
    }

    #[test]
    fn test_memory_source_declared_size_wins() {
        let source =
            MemorySource::new("sales.csv", "a,b\n1,2").with_declared_size(99 * 1024 * 1024);
        assert_eq!(source.size_bytes(), 99 * 1024 * 1024);
    }

    #[test]
    fn test_memory_source_content_type_override() {
        let source = MemorySource::new("export", "a,b\n1,2").with_content_type("text/csv");
        assert_eq!(source.content_type(), "text/csv");
    }

    #[test]
    fn test_file_source_reads_from_disk() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("inventory.csv");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "store_id,product_id").unwrap();
        writeln!(file, "S001,P005").unwrap();

        let source = FileSource::open(&path).unwrap();
        assert_eq!(source.name(), "inventory.csv");
        assert_eq!(source.content_type(), "text/csv");
        assert_eq!(source.size_bytes(), 30);

        let text = source.read_text().unwrap();
        assert!(text.starts_with("store_id,product_id"));
    }

    #[test]
    fn test_file_source_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = FileSource::open(dir.path().join("absent.csv")).unwrap_err();
        match err {
            SessionError::Source { file_name, .. } => assert_eq!(file_name, "absent.csv"),
            other => panic!("expected source error, got {other:?}"),
        }
    }
}
