//! Ingestion session controller
//!
//! Owns one upload flow end to end: selection gate, preview, schema
//! validation, simulated transfer, receipt, and the history record.
//! The controller holds the current `SessionState` and is the only
//! place that advances it, so callers cannot put a session into an
//! inconsistent position.
//!
//! Two failure shapes, per ERRORS.md §3:
//! - domain failures (bad file, schema mismatch, dead transport) move
//!   the session to `Error` with a user-facing message and are also
//!   returned as `Err`;
//! - sequencing misuse (preview before select, upload while busy)
//!   returns `Err` and leaves the session exactly as it was.

use std::sync::Arc;

use uuid::Uuid;

use crate::config::IngestConfig;
use crate::history::{UploadLog, UploadRecord};
use crate::observability::{log_event_with_fields, Event};
use crate::schema::{DatasetSchema, SchemaRegistry, SchemaValidator};
use crate::tabular::{self, ParsedRow};

use super::errors::{SessionError, SessionResult, UPLOAD_FAILED_MESSAGE};
use super::receipt::UploadReceipt;
use super::source::UploadSource;
use super::state::SessionState;
use super::transport::UploadTransport;

/// One upload flow against one dataset schema
pub struct IngestionSession {
    session_id: Uuid,
    schema: DatasetSchema,
    config: IngestConfig,
    state: SessionState,
    source: Option<Box<dyn UploadSource>>,
    preview: Vec<ParsedRow>,
    progress: u8,
    receipt: Option<UploadReceipt>,
    upload_log: Option<Arc<dyn UploadLog>>,
}

impl IngestionSession {
    /// Create a session for the given schema.
    pub fn new(schema: DatasetSchema, config: IngestConfig) -> SessionResult<Self> {
        config.validate()?;
        Ok(Self {
            session_id: Uuid::new_v4(),
            schema,
            config,
            state: SessionState::Idle,
            source: None,
            preview: Vec::new(),
            progress: 0,
            receipt: None,
            upload_log: None,
        })
    }

    /// Create a session for a dataset registered in the registry.
    pub fn for_dataset(
        registry: &SchemaRegistry,
        dataset_id: &str,
        config: IngestConfig,
    ) -> SessionResult<Self> {
        let schema = registry.require(dataset_id)?.clone();
        Self::new(schema, config)
    }

    /// Attach a ledger that receives one record per finished upload.
    pub fn with_upload_log(mut self, upload_log: Arc<dyn UploadLog>) -> Self {
        self.upload_log = Some(upload_log);
        self
    }

    /// Offer a file to the session.
    ///
    /// The gate checks the name and content type, then the declared
    /// size against the configured cap. A rejected file moves the
    /// session to `Error` but keeps the previously accepted file and
    /// its preview, so the caller can still show them. An accepted
    /// file replaces the previous one and clears preview, progress,
    /// and receipt.
    pub fn select(&mut self, source: Box<dyn UploadSource>) -> SessionResult<()> {
        if self.state.is_busy() {
            return Err(SessionError::forbidden_transition(
                self.state.state_name(),
                "Selected",
            ));
        }

        let file_name = source.name().to_string();
        let size_bytes = source.size_bytes();

        let is_csv = file_name.ends_with(".csv") || source.content_type() == "text/csv";
        if !is_csv {
            let err = SessionError::InvalidFileType {
                file_name: file_name.clone(),
            };
            self.state = self.state.clone().reject_selection(err.to_string())?;
            log_event_with_fields(
                Event::SelectRejected,
                &[("file", &file_name), ("reason", "invalid_type")],
            );
            return Err(err);
        }

        if size_bytes > self.config.max_file_size_bytes {
            let err = SessionError::FileTooLarge {
                size_bytes,
                limit_bytes: self.config.max_file_size_bytes,
            };
            self.state = self.state.clone().reject_selection(err.to_string())?;
            log_event_with_fields(
                Event::SelectRejected,
                &[("file", &file_name), ("reason", "too_large")],
            );
            return Err(err);
        }

        self.state = self.state.clone().accept_selection()?;
        self.source = Some(source);
        self.preview.clear();
        self.progress = 0;
        self.receipt = None;

        let size = size_bytes.to_string();
        log_event_with_fields(
            Event::FileSelected,
            &[("file", &file_name), ("size_bytes", &size)],
        );
        Ok(())
    }

    /// Build a preview of the selected file.
    ///
    /// Reads the source and keeps up to `preview_rows` parsed data
    /// rows. Repeated calls rebuild the preview from the source.
    pub fn preview(&mut self) -> SessionResult<&[ParsedRow]> {
        let Some(source) = self.source.as_ref() else {
            return Err(SessionError::NoFileSelected);
        };
        let file_name = source.name().to_string();

        // Probe the transition before touching the source, so a
        // mis-sequenced call cannot leave a half-built preview.
        let next = self.state.clone().build_preview()?;

        match source.read_text() {
            Ok(text) => {
                self.state = next;
                self.preview = tabular::parse(&text, self.config.preview_rows);
                let rows = self.preview.len().to_string();
                log_event_with_fields(
                    Event::PreviewBuilt,
                    &[("file", &file_name), ("rows", &rows)],
                );
                Ok(&self.preview)
            }
            Err(err) => {
                self.preview.clear();
                self.state = self.state.clone().fail_preview(err.to_string())?;
                Err(err)
            }
        }
    }

    /// Upload the selected file.
    ///
    /// Validates the parsed rows against the schema before any
    /// progress is sent; a mismatch fails the upload with the bar
    /// still at zero. On success the transport sees progress from 0
    /// to exactly 100, gets a finalize call, and the caller receives
    /// a receipt. Every finished attempt, either way, is appended to
    /// the upload log.
    pub fn upload(&mut self, transport: &mut dyn UploadTransport) -> SessionResult<UploadReceipt> {
        let Some(source) = self.source.as_ref() else {
            return Err(SessionError::NoFileSelected);
        };
        let file_name = source.name().to_string();

        self.state = self.state.clone().begin_validation()?;
        self.progress = 0;

        let session = self.session_id.to_string();
        log_event_with_fields(
            Event::UploadBegin,
            &[
                ("dataset", &self.schema.dataset_id),
                ("file", &file_name),
                ("session", &session),
            ],
        );

        let text = match source.read_text() {
            Ok(text) => text,
            Err(err) => {
                let reason = err.to_string();
                self.state = self.state.clone().fail_validation(UPLOAD_FAILED_MESSAGE)?;
                log_event_with_fields(
                    Event::UploadFailed,
                    &[("file", &file_name), ("reason", &reason)],
                );
                self.append_history(UploadRecord::failed(
                    self.session_id,
                    &file_name,
                    &self.schema.dataset_id,
                    UPLOAD_FAILED_MESSAGE,
                ));
                return Err(err);
            }
        };

        let rows = tabular::parse(&text, self.config.preview_rows);
        if let Err(schema_err) = SchemaValidator::check_rows(&self.schema, &rows) {
            let message = schema_err.message().to_string();
            self.state = self.state.clone().fail_validation(message.clone())?;
            log_event_with_fields(
                Event::ValidationFailed,
                &[
                    ("dataset", &self.schema.dataset_id),
                    ("file", &file_name),
                    ("reason", &message),
                ],
            );
            self.append_history(UploadRecord::failed(
                self.session_id,
                &file_name,
                &self.schema.dataset_id,
                message,
            ));
            return Err(SessionError::Schema(schema_err));
        }

        self.state = self.state.clone().begin_transfer()?;
        if let Err(err) = self.run_transfer(transport) {
            let reason = err.to_string();
            self.state = self.state.clone().fail_transfer(UPLOAD_FAILED_MESSAGE)?;
            log_event_with_fields(
                Event::UploadFailed,
                &[("file", &file_name), ("reason", &reason)],
            );
            self.append_history(UploadRecord::failed(
                self.session_id,
                &file_name,
                &self.schema.dataset_id,
                UPLOAD_FAILED_MESSAGE,
            ));
            return Err(err);
        }

        let rows_ingested = tabular::count_data_rows(&text);
        let receipt = UploadReceipt::new(rows_ingested, &text);
        self.state = self.state.clone().complete()?;
        self.receipt = Some(receipt.clone());

        let rows_field = rows_ingested.to_string();
        log_event_with_fields(
            Event::UploadComplete,
            &[
                ("dataset", &self.schema.dataset_id),
                ("file", &file_name),
                ("rows", &rows_field),
                ("session", &session),
            ],
        );
        self.append_history(UploadRecord::succeeded(
            self.session_id,
            &file_name,
            &self.schema.dataset_id,
            rows_ingested,
        ));
        Ok(receipt)
    }

    /// Drive the transport from 0 to exactly 100 percent.
    fn run_transfer(&mut self, transport: &mut dyn UploadTransport) -> SessionResult<()> {
        transport.send(0)?;
        while self.progress < 100 {
            self.progress = self.progress.saturating_add(self.config.progress_step).min(100);
            transport.send(self.progress)?;
        }
        transport.finalize()
    }

    /// Return the session to `Idle`, dropping the file, preview,
    /// progress, and receipt. Allowed from every state.
    pub fn reset(&mut self) {
        self.state = std::mem::replace(&mut self.state, SessionState::Idle).reset();
        self.source = None;
        self.preview.clear();
        self.progress = 0;
        self.receipt = None;

        let session = self.session_id.to_string();
        log_event_with_fields(Event::SessionReset, &[("session", &session)]);
    }

    /// Append to the upload log. A dead ledger must not fail the
    /// upload itself, so errors are logged and swallowed.
    fn append_history(&self, record: UploadRecord) {
        if let Some(log) = &self.upload_log {
            if let Err(err) = log.append(&record) {
                let reason = err.to_string();
                log_event_with_fields(Event::HistoryAppendFailed, &[("reason", &reason)]);
            }
        }
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn state_name(&self) -> &'static str {
        self.state.state_name()
    }

    pub fn schema(&self) -> &DatasetSchema {
        &self.schema
    }

    /// Name of the currently selected file, if any.
    pub fn file_name(&self) -> Option<&str> {
        self.source.as_deref().map(|s| s.name())
    }

    /// Last reported transfer progress, 0 through 100.
    pub fn progress(&self) -> u8 {
        self.progress
    }

    /// Rows from the most recent preview.
    pub fn preview_rows(&self) -> &[ParsedRow] {
        &self.preview
    }

    /// Receipt of the completed upload, if the session succeeded.
    pub fn receipt(&self) -> Option<&UploadReceipt> {
        self.receipt.as_ref()
    }

    /// Failure message if the session is in the error state.
    pub fn error_message(&self) -> Option<&str> {
        self.state.error_message()
    }
}
