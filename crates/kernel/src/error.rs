//! Guard error taxonomy.

use thiserror::Error;

/// Failures produced by the guard layer.
///
/// Absence is not represented here: operations report "not found" as
/// `Ok(None)` or `Ok(false)`. Collaborator failures are wrapped as
/// `Internal` and propagate unchanged; the other variants are produced
/// deliberately with caller-safe messages.
#[derive(Debug, Error)]
pub enum GuardError {
    /// Malformed or missing input; the message names the first failing
    /// check.
    #[error("{0}")]
    InvalidInput(String),

    /// Uniqueness violation; the caller must pick a different value.
    #[error("{0}")]
    Conflict(String),

    /// Per-owner ceiling reached; the message carries the limit.
    #[error("{0}")]
    QuotaExceeded(String),

    /// Unexpected collaborator failure.
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

/// Result type alias using GuardError.
pub type GuardResult<T> = Result<T, GuardError>;
