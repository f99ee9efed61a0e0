//! Ingestion session states and transitions
//!
//! Implements the lifecycle defined in INGEST.md §2. Transitions
//! consume the current state and return the next one, so an illegal
//! hop is unrepresentable outside of `Err`.
//!
//! ```text
//! Idle → Selected → PreviewReady → Validating → Uploading → Success
//!                                      ↓            ↓
//!                                    Error        Error
//! ```
//!
//! `Selected`, `Success`, and `Error` accept a new file directly, so a
//! finished session re-enters the flow without passing through `Idle`.

use super::errors::{SessionError, SessionResult};

/// Current position of a session in the ingestion lifecycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    /// No file has been offered yet
    Idle,
    /// A file passed the selection gate and is held by the session
    Selected,
    /// A preview has been built from the selected file
    PreviewReady,
    /// Upload has started and the file is being checked against the schema
    Validating,
    /// Validation passed and the content is moving through the transport
    Uploading,
    /// The upload completed and a receipt was issued
    Success,
    /// Selection, validation, or transfer failed with a user-facing message
    Error(String),
}

impl SessionState {
    /// Get the state name for logs and transition errors.
    pub fn state_name(&self) -> &'static str {
        match self {
            SessionState::Idle => "Idle",
            SessionState::Selected => "Selected",
            SessionState::PreviewReady => "PreviewReady",
            SessionState::Validating => "Validating",
            SessionState::Uploading => "Uploading",
            SessionState::Success => "Success",
            SessionState::Error(_) => "Error",
        }
    }

    /// Check if the session has finished, successfully or not.
    pub fn is_terminal(&self) -> bool {
        matches!(self, SessionState::Success | SessionState::Error(_))
    }

    /// Check if an upload is in flight. Busy states refuse new files.
    pub fn is_busy(&self) -> bool {
        matches!(self, SessionState::Validating | SessionState::Uploading)
    }

    /// Get the failure message if the session is in the error state.
    pub fn error_message(&self) -> Option<&str> {
        match self {
            SessionState::Error(message) => Some(message),
            _ => None,
        }
    }

    /// Accept a file that passed the selection gate.
    ///
    /// Allowed from every state except `Validating` and `Uploading`.
    pub fn accept_selection(self) -> SessionResult<Self> {
        match self {
            SessionState::Idle
            | SessionState::Selected
            | SessionState::PreviewReady
            | SessionState::Success
            | SessionState::Error(_) => Ok(SessionState::Selected),
            other => Err(forbidden(&other, "Selected")),
        }
    }

    /// Record a file that failed the selection gate.
    ///
    /// Allowed from the same states as `accept_selection`.
    pub fn reject_selection(self, message: impl Into<String>) -> SessionResult<Self> {
        match self {
            SessionState::Idle
            | SessionState::Selected
            | SessionState::PreviewReady
            | SessionState::Success
            | SessionState::Error(_) => Ok(SessionState::Error(message.into())),
            other => Err(forbidden(&other, "Error")),
        }
    }

    /// Mark the preview as built. Rebuilding an existing preview is allowed.
    pub fn build_preview(self) -> SessionResult<Self> {
        match self {
            SessionState::Selected | SessionState::PreviewReady => {
                Ok(SessionState::PreviewReady)
            }
            other => Err(forbidden(&other, "PreviewReady")),
        }
    }

    /// Record a preview that could not be read from the source.
    pub fn fail_preview(self, message: impl Into<String>) -> SessionResult<Self> {
        match self {
            SessionState::Selected | SessionState::PreviewReady => {
                Ok(SessionState::Error(message.into()))
            }
            other => Err(forbidden(&other, "Error")),
        }
    }

    /// Start the upload. A preview is not required before uploading.
    pub fn begin_validation(self) -> SessionResult<Self> {
        match self {
            SessionState::Selected | SessionState::PreviewReady => {
                Ok(SessionState::Validating)
            }
            other => Err(forbidden(&other, "Validating")),
        }
    }

    /// Record a validation failure.
    pub fn fail_validation(self, message: impl Into<String>) -> SessionResult<Self> {
        match self {
            SessionState::Validating => Ok(SessionState::Error(message.into())),
            other => Err(forbidden(&other, "Error")),
        }
    }

    /// Hand the validated content to the transport.
    pub fn begin_transfer(self) -> SessionResult<Self> {
        match self {
            SessionState::Validating => Ok(SessionState::Uploading),
            other => Err(forbidden(&other, "Uploading")),
        }
    }

    /// Record a transfer failure.
    pub fn fail_transfer(self, message: impl Into<String>) -> SessionResult<Self> {
        match self {
            SessionState::Uploading => Ok(SessionState::Error(message.into())),
            other => Err(forbidden(&other, "Error")),
        }
    }

    /// Complete the upload.
    pub fn complete(self) -> SessionResult<Self> {
        match self {
            SessionState::Uploading => Ok(SessionState::Success),
            other => Err(forbidden(&other, "Success")),
        }
    }

    /// Return to `Idle`, discarding any failure message. Allowed from
    /// every state.
    pub fn reset(self) -> Self {
        SessionState::Idle
    }
}

fn forbidden(from: &SessionState, to: &'static str) -> SessionError {
    SessionError::forbidden_transition(from.state_name(), to)
}

#[cfg(test)]
mod tests {
    use super::*;

    // ============================================================
    // Selection
    // ============================================================

    #[test]
    fn test_accept_selection_from_idle() {
        let state = SessionState::Idle.accept_selection().unwrap();
        assert_eq!(state, SessionState::Selected);
    }

    #[test]
    fn test_accept_selection_replaces_previous_file() {
        let state = SessionState::Selected.accept_selection().unwrap();
        assert_eq!(state, SessionState::Selected);

        let state = SessionState::PreviewReady.accept_selection().unwrap();
        assert_eq!(state, SessionState::Selected);
    }

    #[test]
    fn test_accept_selection_from_terminal_states() {
        let state = SessionState::Success.accept_selection().unwrap();
        assert_eq!(state, SessionState::Selected);

        let state = SessionState::Error("old failure".into())
            .accept_selection()
            .unwrap();
        assert_eq!(state, SessionState::Selected);
    }

    #[test]
    fn test_accept_selection_refused_while_busy() {
        let err = SessionState::Validating.accept_selection().unwrap_err();
        assert_eq!(
            err.to_string(),
            "forbidden transition: Validating → Selected"
        );

        let err = SessionState::Uploading.accept_selection().unwrap_err();
        assert_eq!(
            err.to_string(),
            "forbidden transition: Uploading → Selected"
        );
    }

    #[test]
    fn test_reject_selection_records_message() {
        let state = SessionState::Idle
            .reject_selection("Please select a valid CSV file")
            .unwrap();
        assert_eq!(
            state.error_message(),
            Some("Please select a valid CSV file")
        );
    }

    #[test]
    fn test_reject_selection_refused_while_busy() {
        let err = SessionState::Uploading
            .reject_selection("too big")
            .unwrap_err();
        assert_eq!(err.to_string(), "forbidden transition: Uploading → Error");
    }

    // ============================================================
    // Preview
    // ============================================================

    #[test]
    fn test_build_preview_from_selected() {
        let state = SessionState::Selected.build_preview().unwrap();
        assert_eq!(state, SessionState::PreviewReady);
    }

    #[test]
    fn test_build_preview_is_repeatable() {
        let state = SessionState::PreviewReady.build_preview().unwrap();
        assert_eq!(state, SessionState::PreviewReady);
    }

    #[test]
    fn test_build_preview_requires_selection() {
        let err = SessionState::Idle.build_preview().unwrap_err();
        assert_eq!(
            err.to_string(),
            "forbidden transition: Idle → PreviewReady"
        );
    }

    #[test]
    fn test_fail_preview_records_message() {
        let state = SessionState::Selected.fail_preview("unreadable").unwrap();
        assert_eq!(state.error_message(), Some("unreadable"));
    }

    // ============================================================
    // Upload
    // ============================================================

    #[test]
    fn test_begin_validation_with_and_without_preview() {
        let state = SessionState::Selected.begin_validation().unwrap();
        assert_eq!(state, SessionState::Validating);

        let state = SessionState::PreviewReady.begin_validation().unwrap();
        assert_eq!(state, SessionState::Validating);
    }

    #[test]
    fn test_begin_validation_requires_selection() {
        let err = SessionState::Idle.begin_validation().unwrap_err();
        assert_eq!(err.to_string(), "forbidden transition: Idle → Validating");

        let err = SessionState::Success.begin_validation().unwrap_err();
        assert_eq!(
            err.to_string(),
            "forbidden transition: Success → Validating"
        );
    }

    #[test]
    fn test_fail_validation_only_while_validating() {
        let state = SessionState::Validating
            .fail_validation("Missing required columns: city")
            .unwrap();
        assert_eq!(
            state.error_message(),
            Some("Missing required columns: city")
        );

        let err = SessionState::Selected
            .fail_validation("nope")
            .unwrap_err();
        assert_eq!(err.to_string(), "forbidden transition: Selected → Error");
    }

    #[test]
    fn test_begin_transfer_only_after_validation() {
        let state = SessionState::Validating.begin_transfer().unwrap();
        assert_eq!(state, SessionState::Uploading);

        let err = SessionState::Selected.begin_transfer().unwrap_err();
        assert_eq!(
            err.to_string(),
            "forbidden transition: Selected → Uploading"
        );
    }

    #[test]
    fn test_complete_only_while_uploading() {
        let state = SessionState::Uploading.complete().unwrap();
        assert_eq!(state, SessionState::Success);

        let err = SessionState::Validating.complete().unwrap_err();
        assert_eq!(
            err.to_string(),
            "forbidden transition: Validating → Success"
        );
    }

    // ============================================================
    // Reset and helpers
    // ============================================================

    #[test]
    fn test_reset_from_every_state() {
        let states = vec![
            SessionState::Idle,
            SessionState::Selected,
            SessionState::PreviewReady,
            SessionState::Validating,
            SessionState::Uploading,
            SessionState::Success,
            SessionState::Error("failed".into()),
        ];
        for state in states {
            assert_eq!(state.reset(), SessionState::Idle);
        }
    }

    #[test]
    fn test_terminal_and_busy_flags() {
        assert!(SessionState::Success.is_terminal());
        assert!(SessionState::Error("x".into()).is_terminal());
        assert!(!SessionState::Uploading.is_terminal());

        assert!(SessionState::Validating.is_busy());
        assert!(SessionState::Uploading.is_busy());
        assert!(!SessionState::PreviewReady.is_busy());
    }

    #[test]
    fn test_full_lifecycle() {
        let state = SessionState::Idle
            .accept_selection()
            .unwrap()
            .build_preview()
            .unwrap()
            .begin_validation()
            .unwrap()
            .begin_transfer()
            .unwrap()
            .complete()
            .unwrap();
        assert_eq!(state, SessionState::Success);
    }

    #[test]
    fn test_failed_lifecycle_then_retry() {
        let state = SessionState::Idle
            .accept_selection()
            .unwrap()
            .begin_validation()
            .unwrap()
            .fail_validation("Missing required columns: price")
            .unwrap();
        assert!(state.is_terminal());

        // A new selection is accepted straight from the error state.
        let state = state.accept_selection().unwrap();
        assert_eq!(state, SessionState::Selected);
    }
}
