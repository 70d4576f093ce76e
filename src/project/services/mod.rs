//! Application services for project orchestration.

mod lifecycle;
mod views;

pub use lifecycle::{
    AssignUserRequest, CreateProjectRequest, ProjectService, ProjectServiceError,
    ProjectServiceResult, RemoveUserOutcome, UpdateProjectRequest,
};
pub use views::{
    AssignedUserView, AssignmentView, ProjectSummary, ProjectView, ScoreView, TaskCard,
    TaskSummary, UserCard,
};
