//! Task aggregate root.

use super::{TaskDomainError, TaskId};
use crate::progress::domain::ProgressId;
use crate::project::domain::ProjectId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Largest point value a single task may carry.
pub const MAX_TASK_SCORE: i64 = 1_000_000;

/// Task aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    id: TaskId,
    project_id: ProjectId,
    name: String,
    description: String,
    score: i64,
    progress_ids: Vec<ProgressId>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted task aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Owning project.
    pub project_id: ProjectId,
    /// Persisted name.
    pub name: String,
    /// Persisted description.
    pub description: String,
    /// Persisted point value.
    pub score: i64,
    /// Progress records created for this task.
    pub progress_ids: Vec<ProgressId>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted last-modified timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Creates a task under `project_id`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError`] when the name or description is blank,
    /// or when `score` lies outside `0..=MAX_TASK_SCORE`.
    pub fn new(
        project_id: ProjectId,
        name: impl Into<String>,
        description: impl Into<String>,
        score: i64,
        clock: &impl Clock,
    ) -> Result<Self, TaskDomainError> {
        let raw_name = name.into();
        let raw_description = description.into();
        let trimmed_name = raw_name.trim();
        let trimmed_description = raw_description.trim();
        if trimmed_name.is_empty() {
            return Err(TaskDomainError::EmptyTaskName);
        }
        if trimmed_description.is_empty() {
            return Err(TaskDomainError::EmptyTaskDescription);
        }
        if !(0..=MAX_TASK_SCORE).contains(&score) {
            return Err(TaskDomainError::ScoreOutOfRange(score));
        }
        let timestamp = clock.utc();
        Ok(Self {
            id: TaskId::new(),
            project_id,
            name: trimmed_name.to_owned(),
            description: trimmed_description.to_owned(),
            score,
            progress_ids: Vec::new(),
            created_at: timestamp,
            updated_at: timestamp,
        })
    }

    /// Picks the score for a new task: `requested` unless absent or zero.
    #[must_use]
    pub fn resolve_score(requested: Option<i64>, default_score: i64) -> i64 {
        requested
            .filter(|score| *score != 0)
            .unwrap_or(default_score)
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            project_id: data.project_id,
            name: data.name,
            description: data.description,
            score: data.score,
            progress_ids: data.progress_ids,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the owning project.
    #[must_use]
    pub const fn project_id(&self) -> ProjectId {
        self.project_id
    }

    /// Returns the task name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the task description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the point value.
    #[must_use]
    pub const fn score(&self) -> i64 {
        self.score
    }

    /// Returns the identifiers of progress records for this task.
    #[must_use]
    pub fn progress_ids(&self) -> &[ProgressId] {
        &self.progress_ids
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

    /// Applies a partial update of name and description.
    ///
    /// Blank values leave the field unchanged. The score is deliberately
    /// not updatable.
    pub fn apply_update(
        &mut self,
        name: Option<String>,
        description: Option<String>,
        clock: &impl Clock,
    ) {
        if let Some(new_name) = name.as_deref().map(str::trim).filter(|v| !v.is_empty()) {
            new_name.clone_into(&mut self.name);
        }
        if let Some(new_description) = description
            .as_deref()
            .map(str::trim)
            .filter(|v| !v.is_empty())
        {
            new_description.clone_into(&mut self.description);
        }
        self.touch(clock);
    }

    /// Records progress identifiers not yet referenced by this task.
    ///
    /// Returns `true` when at least one identifier was added.
    pub fn attach_progress(
        &mut self,
        ids: impl IntoIterator<Item = ProgressId>,
        clock: &impl Clock,
    ) -> bool {
        let before = self.progress_ids.len();
        for id in ids {
            if !self.progress_ids.contains(&id) {
                self.progress_ids.push(id);
            }
        }
        let changed = self.progress_ids.len() != before;
        if changed {
            self.touch(clock);
        }
        changed
    }

    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}
