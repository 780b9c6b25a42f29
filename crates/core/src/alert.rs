//! Presentation-boundary alert contract.
//!
//! The core signals user-facing outcomes as severity-tagged alerts; the
//! collaborating presentation layer renders them as a dialog or toast and, for
//! confirmation requests, reports the user's choice back. No other contract is
//! imposed on the presenter.

use serde::Serialize;

use crate::error::CoreError;

/// Severity of an alert shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertKind {
    Success,
    Error,
    Warning,
    Info,
    /// A question requiring a confirm/cancel answer.
    Confirm,
}

/// A user-facing message with a severity, title, and optional body.
#[derive(Debug, Clone, Serialize)]
pub struct Alert {
    pub kind: AlertKind,
    pub title: String,
    pub message: Option<String>,
}

impl Alert {
    pub fn new(kind: AlertKind, title: impl Into<String>, message: Option<String>) -> Self {
        Self {
            kind,
            title: title.into(),
            message,
        }
    }

    pub fn success(title: impl Into<String>, message: Option<String>) -> Self {
        Self::new(AlertKind::Success, title, message)
    }

    pub fn error(title: impl Into<String>, message: Option<String>) -> Self {
        Self::new(AlertKind::Error, title, message)
    }

    pub fn warning(title: impl Into<String>, message: Option<String>) -> Self {
        Self::new(AlertKind::Warning, title, message)
    }

    pub fn info(title: impl Into<String>, message: Option<String>) -> Self {
        Self::new(AlertKind::Info, title, message)
    }

    pub fn confirm(title: impl Into<String>, message: Option<String>) -> Self {
        Self::new(AlertKind::Confirm, title, message)
    }
}

/// Recoverable domain errors map onto alerts: missing rows and conflicts are
/// warnings the user can act on, everything else is an error.
impl From<&CoreError> for Alert {
    fn from(err: &CoreError) -> Self {
        match err {
            CoreError::NotFound { .. } | CoreError::Conflict(_) => {
                Alert::warning("Operation failed", Some(err.to_string()))
            }
            CoreError::Validation(_) | CoreError::Forbidden(_) => {
                Alert::error("Operation failed", Some(err.to_string()))
            }
            CoreError::Internal(_) => {
                Alert::error("Internal error", Some("An internal error occurred".to_string()))
            }
        }
    }
}

/// The user's answer to a confirmation alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice {
    Confirmed,
    Cancelled,
}

/// Implemented by the presentation collaborator (dialog, toast, console).
pub trait AlertPresenter {
    /// Display an alert. Fire-and-forget.
    fn show(&self, alert: &Alert);

    /// Display a confirmation alert and return the user's choice.
    fn confirm(&self, alert: &Alert) -> Choice;
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;

    /// Records every alert it is handed; answers confirmations with a canned choice.
    struct RecordingPresenter {
        shown: RefCell<Vec<Alert>>,
        answer: Choice,
    }

    impl RecordingPresenter {
        fn new(answer: Choice) -> Self {
            Self {
                shown: RefCell::new(Vec::new()),
                answer,
            }
        }
    }

    impl AlertPresenter for RecordingPresenter {
        fn show(&self, alert: &Alert) {
            self.shown.borrow_mut().push(alert.clone());
        }

        fn confirm(&self, alert: &Alert) -> Choice {
            self.shown.borrow_mut().push(alert.clone());
            self.answer
        }
    }

    #[test]
    fn constructors_set_kind() {
        assert_eq!(Alert::success("ok", None).kind, AlertKind::Success);
        assert_eq!(Alert::error("no", None).kind, AlertKind::Error);
        assert_eq!(Alert::warning("hm", None).kind, AlertKind::Warning);
        assert_eq!(Alert::info("fyi", None).kind, AlertKind::Info);
        assert_eq!(Alert::confirm("sure?", None).kind, AlertKind::Confirm);
    }

    #[test]
    fn kind_serializes_lowercase() {
        let json = serde_json::to_string(&AlertKind::Warning).unwrap();
        assert_eq!(json, "\"warning\"");
    }

    #[test]
    fn not_found_maps_to_warning() {
        let err = CoreError::NotFound {
            entity: "equipment",
            id: uuid::Uuid::nil(),
        };
        let alert = Alert::from(&err);
        assert_eq!(alert.kind, AlertKind::Warning);
        assert!(alert.message.unwrap().contains("equipment"));
    }

    #[test]
    fn conflict_maps_to_warning() {
        let alert = Alert::from(&CoreError::Conflict("duplicate email".to_string()));
        assert_eq!(alert.kind, AlertKind::Warning);
    }

    #[test]
    fn validation_maps_to_error() {
        let alert = Alert::from(&CoreError::Validation("bad status".to_string()));
        assert_eq!(alert.kind, AlertKind::Error);
    }

    #[test]
    fn internal_message_is_sanitized() {
        let alert = Alert::from(&CoreError::Internal("pool exhausted".to_string()));
        assert_eq!(alert.message.as_deref(), Some("An internal error occurred"));
    }

    #[test]
    fn presenter_round_trip() {
        let presenter = RecordingPresenter::new(Choice::Confirmed);
        presenter.show(&Alert::info("hello", None));
        let choice = presenter.confirm(&Alert::confirm("reset?", None));
        assert_eq!(choice, Choice::Confirmed);
        assert_eq!(presenter.shown.borrow().len(), 2);
    }

    #[test]
    fn presenter_can_cancel() {
        let presenter = RecordingPresenter::new(Choice::Cancelled);
        let choice = presenter.confirm(&Alert::confirm("reset?", None));
        assert_eq!(choice, Choice::Cancelled);
    }
}
