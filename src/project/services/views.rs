//! Read projections of projects.
//!
//! Projections are pure functions of domain values and the calling actor,
//! so the role-dependent shaping can be tested without a store.

use crate::identity::domain::{Actor, User, UserId};
use crate::project::domain::{Assignment, Project, ProjectId, UserScore};
use crate::task::domain::{Task, TaskId};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;
use std::hash::BuildHasher;

/// Wire form of an assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentView {
    /// Assigned user.
    pub user_id: UserId,
    /// Start of the assignment.
    pub start_date: DateTime<Utc>,
    /// End of the assignment.
    pub end_date: DateTime<Utc>,
}

impl From<&Assignment> for AssignmentView {
    fn from(assignment: &Assignment) -> Self {
        Self {
            user_id: assignment.user_id,
            start_date: assignment.start_date,
            end_date: assignment.end_date,
        }
    }
}

/// Wire form of a per-user score entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreView {
    /// User the points belong to.
    pub user_id: UserId,
    /// Points earned on the project.
    pub score: i64,
}

impl From<&UserScore> for ScoreView {
    fn from(entry: &UserScore) -> Self {
        Self {
            user_id: entry.user_id,
            score: entry.score,
        }
    }
}

/// Task fields joined into project reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskSummary {
    /// Task identifier.
    pub id: TaskId,
    /// Task name.
    pub name: String,
    /// Task description.
    pub description: String,
    /// Point value.
    pub score: i64,
}

impl From<&Task> for TaskSummary {
    fn from(task: &Task) -> Self {
        Self {
            id: task.id(),
            name: task.name().to_owned(),
            description: task.description().to_owned(),
            score: task.score(),
        }
    }
}

/// Single-project read.
///
/// `assigned_to` is `None` for non-admin readers and is then omitted from
/// the serialized form; `task_details` is only present on reads that join
/// task documents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectView {
    /// Project identifier.
    pub id: ProjectId,
    /// Project name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// Assignments; admin readers only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<Vec<AssignmentView>>,
    /// Referenced task identifiers.
    pub tasks: Vec<TaskId>,
    /// Joined task documents.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task_details: Option<Vec<TaskSummary>>,
    /// Running total of task scores.
    pub total_score: i64,
    /// Per-user score entries visible to the reader.
    pub score_by_user: Vec<ScoreView>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last-modified timestamp.
    pub updated_at: DateTime<Utc>,
}

impl ProjectView {
    /// Full document without joined tasks, as returned by mutations.
    #[must_use]
    pub fn from_project(project: &Project) -> Self {
        Self {
            id: project.id(),
            name: project.name().to_owned(),
            description: project.description().map(str::to_owned),
            assigned_to: Some(project.assigned_to().iter().map(AssignmentView::from).collect()),
            tasks: project.task_ids().to_vec(),
            task_details: None,
            total_score: project.total_score(),
            score_by_user: project.score_by_user().iter().map(ScoreView::from).collect(),
            created_at: project.created_at(),
            updated_at: project.updated_at(),
        }
    }

    /// Shapes a project for `actor`, joining the referenced `tasks`.
    ///
    /// Admins see everything. Other readers lose the assignment list and see
    /// only their own score entry.
    #[must_use]
    pub fn for_actor(project: &Project, tasks: &[Task], actor: &Actor) -> Self {
        let by_id: HashMap<TaskId, &Task> = tasks.iter().map(|task| (task.id(), task)).collect();
        let task_details = project
            .task_ids()
            .iter()
            .filter_map(|id| by_id.get(id).copied())
            .map(TaskSummary::from)
            .collect();

        let mut view = Self::from_project(project);
        view.task_details = Some(task_details);
        if !actor.is_admin() {
            view.assigned_to = None;
            view.score_by_user.retain(|entry| entry.user_id == actor.id());
        }
        view
    }
}

/// User fields joined into project listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserCard {
    /// User identifier.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
}

impl From<&User> for UserCard {
    fn from(user: &User) -> Self {
        Self {
            id: user.id(),
            name: user.display_name(),
            email: user.email().to_owned(),
        }
    }
}

/// Assignment joined with its user, `None` when the user no longer exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignedUserView {
    /// The assigned user.
    pub user: Option<UserCard>,
    /// Start of the assignment.
    pub start_date: DateTime<Utc>,
    /// End of the assignment.
    pub end_date: DateTime<Utc>,
}

/// Task fields joined into project listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskCard {
    /// Task identifier.
    pub id: TaskId,
    /// Task name.
    pub name: String,
    /// Task description.
    pub description: String,
}

/// Entry of a project listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSummary {
    /// Project identifier.
    pub id: ProjectId,
    /// Project name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// Assignments joined with user details.
    pub assigned_to: Vec<AssignedUserView>,
    /// Referenced tasks with their names.
    pub tasks: Vec<TaskCard>,
    /// Running total of task scores.
    pub total_score: i64,
    /// Per-user score entries.
    pub score_by_user: Vec<ScoreView>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last-modified timestamp.
    pub updated_at: DateTime<Utc>,
}

impl ProjectSummary {
    /// Joins `project` with the `users` and `tasks` it references.
    #[must_use]
    pub fn join<S: BuildHasher>(
        project: &Project,
        users: &HashMap<UserId, User, S>,
        tasks: &[Task],
    ) -> Self {
        let by_id: HashMap<TaskId, &Task> = tasks.iter().map(|task| (task.id(), task)).collect();
        Self {
            id: project.id(),
            name: project.name().to_owned(),
            description: project.description().map(str::to_owned),
            assigned_to: project
                .assigned_to()
                .iter()
                .map(|assignment| AssignedUserView {
                    user: users.get(&assignment.user_id).map(UserCard::from),
                    start_date: assignment.start_date,
                    end_date: assignment.end_date,
                })
                .collect(),
            tasks: project
                .task_ids()
                .iter()
                .filter_map(|id| by_id.get(id))
                .map(|task| TaskCard {
                    id: task.id(),
                    name: task.name().to_owned(),
                    description: task.description().to_owned(),
                })
                .collect(),
            total_score: project.total_score(),
            score_by_user: project.score_by_user().iter().map(ScoreView::from).collect(),
            created_at: project.created_at(),
            updated_at: project.updated_at(),
        }
    }
}
