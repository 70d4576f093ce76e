//! Error categories shared by every service in the crate.
//!
//! Each service error exposes a `kind()` so outer layers can map failures to
//! a transport status without matching on individual variants.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Categorical discriminant for request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Malformed or missing input.
    Validation,
    /// The actor lacks the role the operation requires.
    PermissionDenied,
    /// The actor may not access the addressed resource.
    Forbidden,
    /// A referenced project, task, user or progress record is absent.
    NotFound,
    /// The request collides with current state.
    Conflict,
    /// Unexpected store failure.
    Internal,
}

impl ErrorKind {
    /// Returns the HTTP-like status code for this category.
    #[must_use]
    pub const fn status_code(self) -> u16 {
        match self {
            Self::Validation => 400,
            Self::PermissionDenied | Self::Forbidden => 403,
            Self::NotFound => 404,
            Self::Conflict => 409,
            Self::Internal => 500,
        }
    }

    /// Returns the canonical name of the category.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::PermissionDenied => "permission_denied",
            Self::Forbidden => "forbidden",
            Self::NotFound => "not_found",
            Self::Conflict => "conflict",
            Self::Internal => "internal",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
