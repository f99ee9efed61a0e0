//! Observability subsystem for datadock
//!
//! Per OBSERVABILITY.md, this module provides:
//! - Structured logging (JSON)
//! - A closed event catalogue for the ingestion lifecycle
//!
//! # Principles
//!
//! 1. Observability is read-only
//! 2. No side effects on execution
//! 3. No async or background threads
//! 4. Deterministic output
//!
//! # Usage
//!
//! ```ignore
//! use datadock::observability::{log_event_with_fields, Event};
//!
//! log_event_with_fields(Event::FileSelected, &[("file", "sales.csv")]);
//! ```

mod events;
mod logger;

pub use events::Event;
pub use logger::{Logger, Severity};

/// Log a lifecycle event
pub fn log_event(event: Event) {
    log_event_with_fields(event, &[]);
}

/// Log a lifecycle event with fields
///
/// Severity comes from the event itself; ERROR events go to stderr.
pub fn log_event_with_fields(event: Event, fields: &[(&str, &str)]) {
    let severity = event.severity();
    match severity {
        Severity::Error => Logger::log_stderr(severity, event.as_str(), fields),
        _ => Logger::log(severity, event.as_str(), fields),
    }
}
