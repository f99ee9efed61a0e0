//! Observability events for datadock
//!
//! Per OBSERVABILITY.md, this module defines all observable events
//! that can occur during ingestion.
//!
//! Events are explicit and typed: call sites never inline event names
//! as strings.

use std::fmt;

use super::logger::Severity;

/// Observable events in datadock
///
/// Per OBSERVABILITY.md §3, these events cover:
/// - Startup (config, schema registry)
/// - Selection & preview
/// - Upload lifecycle
/// - Upload history
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Startup
    /// Configuration loaded
    ConfigLoaded,
    /// Schema registry populated
    SchemasLoaded,

    // Selection & preview
    /// File accepted into a session
    FileSelected,
    /// File rejected at selection (type or size)
    SelectRejected,
    /// Preview rows built for the selected file
    PreviewBuilt,

    // Upload lifecycle
    /// Upload started
    UploadBegin,
    /// Header validation failed against the dataset schema
    ValidationFailed,
    /// Upload complete, receipt issued
    UploadComplete,
    /// Upload aborted by a read or transport failure
    UploadFailed,
    /// Session returned to idle
    SessionReset,

    // Upload history
    /// The upload history ledger rejected an append
    HistoryAppendFailed,
}

impl Event {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            // Startup
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::SchemasLoaded => "SCHEMAS_LOADED",

            // Selection & preview
            Event::FileSelected => "FILE_SELECTED",
            Event::SelectRejected => "SELECT_REJECTED",
            Event::PreviewBuilt => "PREVIEW_BUILT",

            // Upload lifecycle
            Event::UploadBegin => "UPLOAD_BEGIN",
            Event::ValidationFailed => "VALIDATION_FAILED",
            Event::UploadComplete => "UPLOAD_COMPLETE",
            Event::UploadFailed => "UPLOAD_FAILED",
            Event::SessionReset => "SESSION_RESET",

            // Upload history
            Event::HistoryAppendFailed => "HISTORY_APPEND_FAILED",
        }
    }

    /// Severity this event is logged at
    pub fn severity(&self) -> Severity {
        match self {
            Event::SelectRejected | Event::ValidationFailed => Severity::Warn,
            Event::UploadFailed | Event::HistoryAppendFailed => Severity::Error,
            _ => Severity::Info,
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_EVENTS: [Event; 11] = [
        Event::ConfigLoaded,
        Event::SchemasLoaded,
        Event::FileSelected,
        Event::SelectRejected,
        Event::PreviewBuilt,
        Event::UploadBegin,
        Event::ValidationFailed,
        Event::UploadComplete,
        Event::UploadFailed,
        Event::SessionReset,
        Event::HistoryAppendFailed,
    ];

    #[test]
    fn test_all_events_have_string_representation() {
        for event in ALL_EVENTS {
            let s = event.as_str();
            assert!(!s.is_empty());
            // Verify all uppercase format
            assert!(s.chars().all(|c| c.is_uppercase() || c == '_'));
        }
    }

    #[test]
    fn test_event_names_unique() {
        let mut names: Vec<&str> = ALL_EVENTS.iter().map(|e| e.as_str()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), ALL_EVENTS.len());
    }

    #[test]
    fn test_failure_events_escalated() {
        assert_eq!(Event::SelectRejected.severity(), Severity::Warn);
        assert_eq!(Event::ValidationFailed.severity(), Severity::Warn);
        assert_eq!(Event::UploadFailed.severity(), Severity::Error);
        assert_eq!(Event::HistoryAppendFailed.severity(), Severity::Error);
        assert_eq!(Event::UploadComplete.severity(), Severity::Info);
    }

    #[test]
    fn test_event_display() {
        assert_eq!(format!("{}", Event::UploadBegin), "UPLOAD_BEGIN");
        assert_eq!(format!("{}", Event::SessionReset), "SESSION_RESET");
    }
}
