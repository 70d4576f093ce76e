//! Error types for identity parsing and authorization.

use super::Role;
use thiserror::Error;

/// Returned when an actor lacks the role an operation requires.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("operation requires the {required} role, caller has {actual}")]
pub struct AuthorizationError {
    /// Role the operation demands.
    pub required: Role,
    /// Role the caller holds.
    pub actual: Role,
}

/// Error returned while parsing roles from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown user role: {0}")]
pub struct ParseRoleError(pub String);
