//! Error types for the review kiosk.
//!
//! This module defines the error types used throughout the crate, providing
//! structured error handling with clear, human-readable messages.

use thiserror::Error;

use crate::form::ViewState;
use crate::review::{Aspect, MAX_RATING};

/// Errors raised while recording reviews.
///
/// Configuration problems are reported as
/// [`ConfigError`](crate::config::ConfigError), terminal failures as
/// [`TuiError`], and component-level rejections as [`FormError`].
#[derive(Error, Debug)]
pub enum KioskError {
    /// File system I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors that can occur during TUI operation.
#[derive(Error, Debug)]
pub enum TuiError {
    /// Terminal initialization failed.
    #[error("failed to initialize terminal: {0}")]
    TerminalInit(#[source] std::io::Error),

    /// Terminal rendering failed.
    #[error("render error: {0}")]
    Render(#[source] std::io::Error),

    /// Event handling error.
    #[error("event error: {0}")]
    Event(String),
}

/// Rejections returned by the review form's operations.
///
/// Only [`FormError::IncompleteRatings`] is user-facing; the form also keeps
/// it as the active notice so the front end can show it as a blocking alert.
/// The other variants report caller mistakes and leave state untouched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    /// Submission attempted while at least one aspect is unrated.
    #[error("incomplete ratings: please rate {}", join_aspects(.missing))]
    IncompleteRatings { missing: Vec<Aspect> },

    /// Rating value outside `1..=5`.
    #[error("rating {0} is out of range (1-{max})", max = MAX_RATING)]
    RatingOutOfRange(u8),

    /// A submission is already in flight; the new one is not queued.
    #[error("a submission is already in progress")]
    SubmissionInFlight,

    /// Input is locked while a submission is in flight.
    #[error("the form is locked while submitting")]
    Locked,

    /// Operation requires the form view.
    #[error("the form is not active (current view: {0:?})")]
    Unavailable(ViewState),
}

impl FormError {
    /// Returns `true` for errors the user should see as an alert.
    #[must_use]
    pub fn is_user_facing(&self) -> bool {
        matches!(self, FormError::IncompleteRatings { .. })
    }
}

fn join_aspects(aspects: &[Aspect]) -> String {
    aspects
        .iter()
        .map(|aspect| aspect.label())
        .collect::<Vec<_>>()
        .join(", ")
}

/// A specialized `Result` type for kiosk operations.
pub type Result<T> = std::result::Result<T, KioskError>;
