//! Domain model for tasks.
//!
//! A task belongs to exactly one project for its whole life and keeps the
//! identifiers of the progress records created for it.

mod error;
mod ids;
mod task;

pub use error::TaskDomainError;
pub use ids::TaskId;
pub use task::{MAX_TASK_SCORE, PersistedTaskData, Task};
