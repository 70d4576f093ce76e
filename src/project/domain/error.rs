//! Error types for project domain validation.

use crate::identity::domain::UserId;
use thiserror::Error;

/// Errors returned while constructing or mutating projects.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProjectDomainError {
    /// The project name is missing or blank.
    #[error("project name is required")]
    EmptyProjectName,

    /// One or both assignment dates were not supplied.
    #[error("start and end dates are required")]
    MissingAssignmentDates,

    /// An assignment date could not be parsed.
    #[error("invalid {field} date '{value}'")]
    InvalidDate {
        /// Which date was malformed (`start` or `end`).
        field: &'static str,
        /// The rejected input.
        value: String,
    },

    /// The start date is not strictly earlier than the end date.
    #[error("start date must be earlier than end date")]
    StartNotBeforeEnd,

    /// The start date falls on a day before today.
    #[error("start date cannot be earlier than today")]
    StartBeforeToday,

    /// The end date falls on a day before today.
    #[error("end date cannot be earlier than today")]
    EndBeforeToday,

    /// The user already holds an assignment on the project.
    #[error("user {0} is already assigned to this project")]
    AlreadyAssigned(UserId),

    /// Applying a task score would overflow a running total.
    #[error("score total out of range: {total} {op} {points}")]
    ScoreOverflow {
        /// Total before the change.
        total: i64,
        /// Either `+` or `-`.
        op: char,
        /// Points that could not be applied.
        points: i64,
    },
}

impl ProjectDomainError {
    /// Returns `true` for errors that collide with existing state rather
    /// than reject malformed input.
    #[must_use]
    pub const fn is_conflict(&self) -> bool {
        matches!(self, Self::AlreadyAssigned(_))
    }
}
