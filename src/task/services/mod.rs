//! Application services for task orchestration.

mod lifecycle;
mod views;

pub use lifecycle::{
    CreateTaskRequest, TaskService, TaskServiceError, TaskServiceResult, UpdateTaskRequest,
};
pub use views::{ProgressView, TaskFields, TaskView, UserProgress};
