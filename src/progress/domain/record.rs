//! Progress record aggregate.

use super::{ProgressDomainError, ProgressId, ProgressStatus};
use crate::identity::domain::UserId;
use crate::project::domain::ProjectId;
use crate::task::domain::TaskId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Completion state of one user on one task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressRecord {
    id: ProgressId,
    user_id: UserId,
    project_id: ProjectId,
    task_id: TaskId,
    status: ProgressStatus,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted progress record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedProgressData {
    /// Persisted record identifier.
    pub id: ProgressId,
    /// Owning user.
    pub user_id: UserId,
    /// Project of the task.
    pub project_id: ProjectId,
    /// Tracked task.
    pub task_id: TaskId,
    /// Persisted status.
    pub status: ProgressStatus,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted last-modified timestamp.
    pub updated_at: DateTime<Utc>,
}

impl ProgressRecord {
    /// Creates a pending record.
    #[must_use]
    pub fn pending(
        user_id: UserId,
        project_id: ProjectId,
        task_id: TaskId,
        clock: &impl Clock,
    ) -> Self {
        let timestamp = clock.utc();
        Self {
            id: ProgressId::new(),
            user_id,
            project_id,
            task_id,
            status: ProgressStatus::Pending,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs a record from persisted storage.
    #[must_use]
    pub const fn from_persisted(data: PersistedProgressData) -> Self {
        Self {
            id: data.id,
            user_id: data.user_id,
            project_id: data.project_id,
            task_id: data.task_id,
            status: data.status,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the record identifier.
    #[must_use]
    pub const fn id(&self) -> ProgressId {
        self.id
    }

    /// Returns the owning user.
    #[must_use]
    pub const fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Returns the project of the tracked task.
    #[must_use]
    pub const fn project_id(&self) -> ProjectId {
        self.project_id
    }

    /// Returns the tracked task.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        self.task_id
    }

    /// Returns the current status.
    #[must_use]
    pub const fn status(&self) -> ProgressStatus {
        self.status
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the last-modified timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns `true` when `user_id` owns this record.
    #[must_use]
    pub fn is_owned_by(&self, user_id: UserId) -> bool {
        self.user_id == user_id
    }

    /// Moves the record to `target`.
    ///
    /// # Errors
    ///
    /// Returns [`ProgressDomainError::InvalidStatusTransition`] when the
    /// record is already completed; the record is left unchanged.
    pub fn transition_to(
        &mut self,
        target: ProgressStatus,
        clock: &impl Clock,
    ) -> Result<(), ProgressDomainError> {
        if !self.status.can_transition_to(target) {
            return Err(ProgressDomainError::InvalidStatusTransition {
                progress_id: self.id,
                from: self.status,
                to: target,
            });
        }
        self.status = target;
        self.updated_at = clock.utc();
        Ok(())
    }
}
