//! Error types for progress status handling.

use super::{ProgressId, ProgressStatus};
use thiserror::Error;

/// Errors returned while mutating progress records.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProgressDomainError {
    /// The record is completed and accepts no further transitions.
    #[error("progress {progress_id} is already {from}; cannot move to {to}")]
    InvalidStatusTransition {
        /// Record that rejected the transition.
        progress_id: ProgressId,
        /// Current status.
        from: ProgressStatus,
        /// Requested status.
        to: ProgressStatus,
    },
}

/// Error returned while parsing a progress status.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown progress status: {0}")]
pub struct ParseProgressStatusError(pub String);
