//! Error types for the vote controller

use reward_estimator::{ComputationError, ContentKey};
use thiserror::Error;

/// Result type for controller operations
pub type Result<T> = std::result::Result<T, ControllerError>;

/// Controller error types.
///
/// Transport failures never surface here: they are converted into a user
/// notification and a [`crate::SubmissionOutcome::Failed`].
#[derive(Error, Debug)]
pub enum ControllerError {
    /// Operation needs an open vote dialog
    #[error("Vote dialog is not open")]
    DialogNotOpen,

    /// Operation needs an active account
    #[error("No active account")]
    NotAuthenticated,

    /// A vote for the same voter and content is still in flight
    #[error("Vote by {voter} on @{author}/{permalink} is already in flight")]
    AlreadySubmitting {
        voter: String,
        author: String,
        permalink: String,
    },

    /// Controller was disposed
    #[error("Controller has been disposed")]
    Disposed,

    /// Percent outside the representable range
    #[error("Invalid vote percent: {0}")]
    InvalidPercent(f64),

    /// Content snapshot for a different item
    #[error("Content mismatch: controller is bound to {expected}, got {actual}")]
    ContentMismatch {
        expected: ContentKey,
        actual: ContentKey,
    },

    /// Estimation failed on degenerate input
    #[error("Estimation error: {0}")]
    Computation(#[from] ComputationError),

    /// Submission task ended abnormally
    #[error("Submission task failed: {0}")]
    Task(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<serde_yaml::Error> for ControllerError {
    fn from(err: serde_yaml::Error) -> Self {
        ControllerError::Config(err.to_string())
    }
}

impl From<tokio::task::JoinError> for ControllerError {
    fn from(err: tokio::task::JoinError) -> Self {
        ControllerError::Task(err.to_string())
    }
}
