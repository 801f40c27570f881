//! Error types for assignment optimization.
//!
//! All failures are caller or configuration errors: there is no I/O in the
//! search itself, so nothing here is retryable.

use thiserror::Error;

use crate::validation::ValidationError;

/// Errors produced by the assignment GA and its loaders.
#[derive(Error, Debug)]
pub enum AssignError {
    /// Bad configuration or input supplied by the caller.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A chromosome or population broke an internal invariant.
    #[error("invariant violation: {0}")]
    InvariantViolation(String),

    /// Input the selected strategy cannot work with (e.g. non-positive
    /// total fitness under proportional selection with fallback disabled).
    #[error("degenerate input: {0}")]
    DegenerateInput(String),

    /// Malformed matrix or parameter JSON.
    #[error("failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Matrix or parameter file could not be read.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Crate result alias.
pub type Result<T> = std::result::Result<T, AssignError>;

impl AssignError {
    /// Folds a list of configuration/matrix problems into one `InvalidArgument`.
    pub fn invalid(errors: &[ValidationError]) -> Self {
        Self::InvalidArgument(join_messages(errors))
    }

    /// Folds a list of chromosome problems into one `InvariantViolation`.
    pub fn violation(errors: &[ValidationError]) -> Self {
        Self::InvariantViolation(join_messages(errors))
    }
}

fn join_messages(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}
