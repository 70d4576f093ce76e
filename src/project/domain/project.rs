//! Project aggregate root.

use super::{Assignment, AssignmentWindow, ProjectDomainError, ProjectId, UserScore};
use crate::identity::domain::UserId;
use crate::task::domain::TaskId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Project aggregate root.
///
/// `total_score` tracks the sum of the scores of the tasks in `task_ids`;
/// it is maintained incrementally by [`Project::attach_task`] and
/// [`Project::detach_task`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    id: ProjectId,
    name: String,
    description: Option<String>,
    assigned_to: Vec<Assignment>,
    task_ids: Vec<TaskId>,
    total_score: i64,
    score_by_user: Vec<UserScore>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedProjectData {
    /// Persisted project identifier.
    pub id: ProjectId,
    /// Persisted name.
    pub name: String,
    /// Persisted description, if any.
    pub description: Option<String>,
    /// Persisted assignments in insertion order.
    pub assigned_to: Vec<Assignment>,
    /// Persisted task references.
    pub task_ids: Vec<TaskId>,
    /// Persisted running total of task scores.
    pub total_score: i64,
    /// Persisted per-user score entries.
    pub score_by_user: Vec<UserScore>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted last-modified timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Project {
    /// Creates an empty project.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectDomainError::EmptyProjectName`] when `name` is blank.
    pub fn new(
        name: impl Into<String>,
        description: Option<String>,
        clock: &impl Clock,
    ) -> Result<Self, ProjectDomainError> {
        let raw_name = name.into();
        let trimmed = raw_name.trim();
        if trimmed.is_empty() {
            return Err(ProjectDomainError::EmptyProjectName);
        }
        let timestamp = clock.utc();
        Ok(Self {
            id: ProjectId::new(),
            name: trimmed.to_owned(),
            description,
            assigned_to: Vec::new(),
            task_ids: Vec::new(),
            total_score: 0,
            score_by_user: Vec::new(),
            created_at: timestamp,
            updated_at: timestamp,
        })
    }

    /// Reconstructs a project from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedProjectData) -> Self {
        Self {
            id: data.id,
            name: data.name,
            description: data.description,
            assigned_to: data.assigned_to,
            task_ids: data.task_ids,
            total_score: data.total_score,
            score_by_user: data.score_by_user,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the project identifier.
    #[must_use]
    pub const fn id(&self) -> ProjectId {
        self.id
    }

    /// Returns the project name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns assignments in insertion order.
    #[must_use]
    pub fn assigned_to(&self) -> &[Assignment] {
        &self.assigned_to
    }

    /// Returns the referenced task identifiers.
    #[must_use]
    pub fn task_ids(&self) -> &[TaskId] {
        &self.task_ids
    }

    /// Returns the running total of task scores.
    #[must_use]
    pub const fn total_score(&self) -> i64 {
        self.total_score
    }

    /// Returns the per-user score entries.
    #[must_use]
    pub fn score_by_user(&self) -> &[UserScore] {
        &self.score_by_user
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

    /// Returns `true` when `user_id` holds an assignment.
    #[must_use]
    pub fn is_assigned(&self, user_id: UserId) -> bool {
        self.assigned_to
            .iter()
            .any(|assignment| assignment.user_id == user_id)
    }

    /// Returns the score entry for `user_id`, if tracked.
    #[must_use]
    pub fn score_of(&self, user_id: UserId) -> Option<i64> {
        self.score_by_user
            .iter()
            .find(|entry| entry.user_id == user_id)
            .map(|entry| entry.score)
    }

    /// Iterates over the identifiers of assigned users.
    pub fn assigned_user_ids(&self) -> impl Iterator<Item = UserId> + '_ {
        self.assigned_to.iter().map(|assignment| assignment.user_id)
    }

    /// Applies a partial update. Blank values leave the field unchanged.
    pub fn apply_update(
        &mut self,
        name: Option<String>,
        description: Option<String>,
        clock: &impl Clock,
    ) {
        if let Some(new_name) = name.as_deref().map(str::trim).filter(|v| !v.is_empty()) {
            new_name.clone_into(&mut self.name);
        }
        if let Some(new_description) = description.filter(|v| !v.trim().is_empty()) {
            self.description = Some(new_description);
        }
        self.touch(clock);
    }

    /// Assigns `user_id` for `window` and starts tracking their score.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectDomainError::AlreadyAssigned`] when the user is
    /// already assigned; the project is left unchanged.
    pub fn assign(
        &mut self,
        user_id: UserId,
        window: AssignmentWindow,
        clock: &impl Clock,
    ) -> Result<(), ProjectDomainError> {
        if self.is_assigned(user_id) {
            return Err(ProjectDomainError::AlreadyAssigned(user_id));
        }
        if self.score_of(user_id).is_none() {
            self.score_by_user.push(UserScore::zero(user_id));
        }
        self.assigned_to.push(Assignment::new(user_id, window));
        self.touch(clock);
        Ok(())
    }

    /// Removes the assignment of `user_id`.
    ///
    /// The score entry is kept. Returns `false` when the user was not
    /// assigned, in which case nothing changes.
    pub fn unassign(&mut self, user_id: UserId, clock: &impl Clock) -> bool {
        let Some(position) = self
            .assigned_to
            .iter()
            .position(|assignment| assignment.user_id == user_id)
        else {
            return false;
        };
        self.assigned_to.remove(position);
        self.touch(clock);
        true
    }

    /// References a new task and adds its score to the total.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectDomainError::ScoreOverflow`] when the total would
    /// leave the `i64` range; the project is left unchanged.
    pub fn attach_task(
        &mut self,
        task_id: TaskId,
        score: i64,
        clock: &impl Clock,
    ) -> Result<(), ProjectDomainError> {
        self.total_score = checked_apply(self.total_score, '+', score)?;
        self.task_ids.push(task_id);
        self.touch(clock);
        Ok(())
    }

    /// Drops a task reference and subtracts its score from the total.
    ///
    /// The total is not floored at zero.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectDomainError::ScoreOverflow`] when the total would
    /// leave the `i64` range; the project is left unchanged.
    pub fn detach_task(
        &mut self,
        task_id: TaskId,
        score: i64,
        clock: &impl Clock,
    ) -> Result<(), ProjectDomainError> {
        self.total_score = checked_apply(self.total_score, '-', score)?;
        self.task_ids.retain(|id| *id != task_id);
        self.touch(clock);
        Ok(())
    }

    /// Credits `points` to `user_id`, creating the entry when missing.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectDomainError::ScoreOverflow`] when the user's score
    /// would leave the `i64` range; the project is left unchanged.
    pub fn credit(
        &mut self,
        user_id: UserId,
        points: i64,
        clock: &impl Clock,
    ) -> Result<(), ProjectDomainError> {
        if let Some(entry) = self
            .score_by_user
            .iter_mut()
            .find(|entry| entry.user_id == user_id)
        {
            entry.score = checked_apply(entry.score, '+', points)?;
            self.touch(clock);
            return Ok(());
        }
        self.score_by_user.push(UserScore {
            user_id,
            score: points,
        });
        self.touch(clock);
        Ok(())
    }

    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}

fn checked_apply(total: i64, op: char, points: i64) -> Result<i64, ProjectDomainError> {
    let next = if op == '-' {
        total.checked_sub(points)
    } else {
        total.checked_add(points)
    };
    next.ok_or(ProjectDomainError::ScoreOverflow { total, op, points })
}
