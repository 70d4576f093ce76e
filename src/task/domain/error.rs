//! Error types for task domain validation.

use thiserror::Error;

/// Errors returned while constructing domain task values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The task name is missing or blank.
    #[error("task name is required")]
    EmptyTaskName,

    /// The task description is missing or blank.
    #[error("task description is required")]
    EmptyTaskDescription,

    /// The score is negative or above [`super::MAX_TASK_SCORE`].
    #[error("task score {0} must be between 0 and {max}", max = super::MAX_TASK_SCORE)]
    ScoreOutOfRange(i64),
}
