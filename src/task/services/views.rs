//! Read projections of tasks and progress records.

use crate::identity::domain::{Actor, User, UserId};
use crate::progress::domain::{ProgressId, ProgressRecord, ProgressStatus};
use crate::project::domain::ProjectId;
use crate::task::domain::{Task, TaskId};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Task fields shown to every reader.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskFields {
    /// Task identifier.
    pub id: TaskId,
    /// Task name.
    pub name: String,
    /// Task description.
    pub description: String,
    /// Point value.
    pub score: i64,
}

/// A progress record joined with its owner's display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressView {
    /// Record identifier.
    pub id: ProgressId,
    /// Owning user.
    pub user_id: UserId,
    /// Display name of the owning user, when the user still exists.
    pub user_name: Option<String>,
    /// Project of the task.
    pub project_id: ProjectId,
    /// Tracked task.
    pub task_id: TaskId,
    /// Current status.
    pub status: ProgressStatus,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last-modified timestamp.
    pub updated_at: DateTime<Utc>,
}

impl ProgressView {
    /// Joins `record` with its owner.
    #[must_use]
    pub fn join(record: &ProgressRecord, owner: Option<&User>) -> Self {
        Self {
            id: record.id(),
            user_id: record.user_id(),
            user_name: owner.map(User::display_name),
            project_id: record.project_id(),
            task_id: record.task_id(),
            status: record.status(),
            created_at: record.created_at(),
            updated_at: record.updated_at(),
        }
    }
}

/// The reader's own progress on a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum UserProgress {
    /// The reader has a record for the task.
    Recorded(ProgressView),
    /// The reader has no record; serializes as `null`.
    Missing,
}

impl From<Option<ProgressView>> for UserProgress {
    fn from(progress: Option<ProgressView>) -> Self {
        progress.map_or(Self::Missing, Self::Recorded)
    }
}

/// Single-task read.
///
/// `user_progress` is omitted for administrators. For other readers it is
/// present and serializes as `null` when they have no record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskView {
    /// Task fields.
    pub task: TaskFields,
    /// The reader's own progress on the task.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_progress: Option<UserProgress>,
}

impl TaskView {
    /// Shapes `task` for `actor`, attaching `progress` for non-admin readers.
    #[must_use]
    pub fn for_actor(task: &Task, actor: &Actor, progress: Option<ProgressView>) -> Self {
        Self {
            task: TaskFields {
                id: task.id(),
                name: task.name().to_owned(),
                description: task.description().to_owned(),
                score: task.score(),
            },
            user_progress: (!actor.is_admin()).then(|| UserProgress::from(progress)),
        }
    }
}
