//! Service layer for task lifecycle and progress updates.

use super::views::{ProgressView, TaskView};
use crate::config::TrackerConfig;
use crate::error::ErrorKind;
use crate::identity::{
    domain::{Actor, AuthorizationError, Role, UserId},
    ports::{UserDirectory, UserDirectoryError},
};
use crate::progress::{
    domain::{ParseProgressStatusError, ProgressDomainError, ProgressRecord, ProgressStatus},
    ports::{ProgressRepository, ProgressRepositoryError},
    services::ProgressLedger,
};
use crate::project::{
    domain::{ProjectDomainError, ProjectId},
    ports::{ProjectRepository, ProjectRepositoryError},
};
use crate::task::{
    domain::{Task, TaskDomainError, TaskId},
    ports::{TaskRepository, TaskRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Request payload for creating a task under a project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    project_id: ProjectId,
    name: String,
    description: String,
    score: Option<i64>,
}

impl CreateTaskRequest {
    /// Creates a request with the required fields and no explicit score.
    #[must_use]
    pub fn new(
        project_id: ProjectId,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            project_id,
            name: name.into(),
            description: description.into(),
            score: None,
        }
    }

    /// Sets the point value. Zero falls back to the configured default.
    #[must_use]
    pub const fn with_score(mut self, score: i64) -> Self {
        self.score = Some(score);
        self
    }
}

/// Request payload for a partial task update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateTaskRequest {
    task_id: TaskId,
    name: Option<String>,
    description: Option<String>,
}

impl UpdateTaskRequest {
    /// Creates a request that changes nothing.
    #[must_use]
    pub const fn new(task_id: TaskId) -> Self {
        Self {
            task_id,
            name: None,
            description: None,
        }
    }

    /// Sets the new name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the new description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Service-level errors for task operations.
#[derive(Debug, Error)]
pub enum TaskServiceError {
    /// Task validation failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),
    /// The requested status is not recognised.
    #[error(transparent)]
    InvalidStatus(#[from] ParseProgressStatusError),
    /// The progress record rejected the transition.
    #[error(transparent)]
    Progress(#[from] ProgressDomainError),
    /// The owning project rejected a score change.
    #[error(transparent)]
    ProjectDomain(#[from] ProjectDomainError),
    /// The actor lacks the required role.
    #[error(transparent)]
    Authorization(#[from] AuthorizationError),
    /// The addressed task does not exist.
    #[error("task not found: {0}")]
    TaskNotFound(TaskId),
    /// The owning project does not exist.
    #[error("project not found: {0}")]
    ProjectNotFound(ProjectId),
    /// The actor has no progress record for the task.
    #[error("no progress for user {user_id} on task {task_id}")]
    ProgressNotFound {
        /// Task that was addressed.
        task_id: TaskId,
        /// Caller without a record.
        user_id: UserId,
    },
    /// The record belongs to another user.
    #[error("progress on task {task_id} is not owned by user {user_id}")]
    NotRecordOwner {
        /// Task that was addressed.
        task_id: TaskId,
        /// Caller that was refused.
        user_id: UserId,
    },
    /// Task repository operation failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
    /// Project repository operation failed.
    #[error(transparent)]
    ProjectRepository(#[from] ProjectRepositoryError),
    /// Progress repository operation failed.
    #[error(transparent)]
    ProgressRepository(#[from] ProgressRepositoryError),
    /// User lookup failed.
    #[error(transparent)]
    Directory(#[from] UserDirectoryError),
}

impl TaskServiceError {
    /// Returns the category of this failure.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Domain(_) | Self::InvalidStatus(_) | Self::ProjectDomain(_) => {
                ErrorKind::Validation
            }
            Self::Progress(_) => ErrorKind::Conflict,
            Self::Authorization(_) => ErrorKind::PermissionDenied,
            Self::NotRecordOwner { .. } => ErrorKind::Forbidden,
            Self::TaskNotFound(_)
            | Self::ProjectNotFound(_)
            | Self::ProgressNotFound { .. }
            | Self::Repository(TaskRepositoryError::NotFound(_)) => ErrorKind::NotFound,
            Self::Repository(_)
            | Self::ProjectRepository(_)
            | Self::ProgressRepository(_)
            | Self::Directory(_) => ErrorKind::Internal,
        }
    }
}

/// Result type for task service operations.
pub type TaskServiceResult<T> = Result<T, TaskServiceError>;

/// Task orchestration service.
#[derive(Clone)]
pub struct TaskService<P, T, G, U, C>
where
    P: ProjectRepository,
    T: TaskRepository,
    G: ProgressRepository,
    U: UserDirectory,
    C: Clock + Send + Sync,
{
    projects: Arc<P>,
    tasks: Arc<T>,
    ledger: ProgressLedger<G, C>,
    users: Arc<U>,
    clock: Arc<C>,
    config: TrackerConfig,
}

impl<P, T, G, U, C> TaskService<P, T, G, U, C>
where
    P: ProjectRepository,
    T: TaskRepository,
    G: ProgressRepository,
    U: UserDirectory,
    C: Clock + Send + Sync,
{
    /// Creates a new task service with the default configuration.
    #[must_use]
    pub fn new(
        projects: Arc<P>,
        tasks: Arc<T>,
        progress: Arc<G>,
        users: Arc<U>,
        clock: Arc<C>,
    ) -> Self {
        Self {
            projects,
            tasks,
            ledger: ProgressLedger::new(progress, Arc::clone(&clock)),
            users,
            clock,
            config: TrackerConfig::default(),
        }
    }

    /// Replaces the service configuration.
    #[must_use]
    pub const fn with_config(mut self, config: TrackerConfig) -> Self {
        self.config = config;
        self
    }

    /// Creates a task and enrols every assigned user of its project.
    ///
    /// Any authenticated caller may create tasks.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Domain`] for a blank name or description
    /// or an out-of-range score, [`TaskServiceError::ProjectNotFound`],
    /// [`TaskServiceError::ProjectDomain`] when the project total would
    /// overflow, or a repository failure. Nothing is stored on failure.
    pub async fn create(&self, actor: &Actor, request: CreateTaskRequest) -> TaskServiceResult<Task> {
        let CreateTaskRequest {
            project_id,
            name,
            description,
            score,
        } = request;
        let resolved_score = Task::resolve_score(score, self.config.default_task_score);
        let mut task = Task::new(project_id, name, description, resolved_score, &*self.clock)?;
        let mut project = self
            .projects
            .find_by_id(project_id)
            .await?
            .ok_or(TaskServiceError::ProjectNotFound(project_id))?;

        project.attach_task(task.id(), task.score(), &*self.clock)?;
        self.tasks.store(&task).await?;
        self.projects.update(&project).await?;

        let user_ids: Vec<UserId> = project.assigned_user_ids().collect();
        let records = self.ledger.enrol_task(&task, &user_ids).await?;
        if task.attach_progress(records.iter().map(ProgressRecord::id), &*self.clock) {
            self.tasks.update(&task).await?;
        }
        tracing::info!(
            task_id = %task.id(),
            %project_id,
            actor = %actor.id(),
            score = task.score(),
            enrolled = records.len(),
            "task created"
        );
        Ok(task)
    }

    /// Deletes a task, its progress records and its project reference.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Authorization`] for non-admin callers,
    /// [`TaskServiceError::TaskNotFound`], [`TaskServiceError::ProjectDomain`]
    /// when the project total would overflow, or a repository failure.
    pub async fn delete(&self, actor: &Actor, task_id: TaskId) -> TaskServiceResult<()> {
        actor.require_role(Role::Admin)?;
        let task = self.find_task(task_id).await?;
        let mut owner = self.projects.find_by_id(task.project_id()).await?;
        if owner.is_none() {
            tracing::warn!(
                %task_id,
                project_id = %task.project_id(),
                "owning project already gone, deleting task only"
            );
        }
        if let Some(project) = owner.as_mut() {
            project.detach_task(task_id, task.score(), &*self.clock)?;
        }

        let removed = self.ledger.purge_task(task_id).await?;
        if let Some(project) = owner {
            self.projects.update(&project).await?;
        }

        self.tasks.delete(task_id).await?;
        tracing::info!(%task_id, removed, "task deleted");
        Ok(())
    }

    /// Applies a partial update of name and description.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Authorization`] for non-admin callers,
    /// [`TaskServiceError::TaskNotFound`], or a repository failure.
    pub async fn update(&self, actor: &Actor, request: UpdateTaskRequest) -> TaskServiceResult<Task> {
        actor.require_role(Role::Admin)?;
        let mut task = self.find_task(request.task_id).await?;
        task.apply_update(request.name, request.description, &*self.clock);
        self.tasks.update(&task).await?;
        tracing::info!(task_id = %task.id(), "task updated");
        Ok(task)
    }

    /// Reads one task, shaped for `actor`.
    ///
    /// Non-admin callers also receive their own progress record, if any.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::TaskNotFound`] or a repository failure.
    pub async fn get(&self, actor: &Actor, task_id: TaskId) -> TaskServiceResult<TaskView> {
        let task = self.find_task(task_id).await?;
        if actor.is_admin() {
            return Ok(TaskView::for_actor(&task, actor, None));
        }
        let Some(record) = self.ledger.find(actor.id(), task_id).await? else {
            return Ok(TaskView::for_actor(&task, actor, None));
        };
        let owner = self.users.find_by_id(record.user_id()).await?;
        let progress = ProgressView::join(&record, owner.as_ref());
        Ok(TaskView::for_actor(&task, actor, Some(progress)))
    }

    /// Moves the caller's progress on a task to `status`.
    ///
    /// Checks run in order: task existence, status validity, record
    /// existence, record ownership, transition validity. Completing a record
    /// credits the task score to the caller on the owning project; the
    /// record is only saved once the credit has been applied.
    ///
    /// # Errors
    ///
    /// Returns the first failing check as [`TaskServiceError`],
    /// [`TaskServiceError::ProjectNotFound`] when completion finds the project
    /// gone, [`TaskServiceError::ProjectDomain`] when the credit would
    /// overflow, or a repository failure.
    pub async fn update_progress(
        &self,
        actor: &Actor,
        task_id: TaskId,
        status: &str,
    ) -> TaskServiceResult<ProgressRecord> {
        let task = self.find_task(task_id).await?;
        let target = ProgressStatus::try_from(status)?;
        let user_id = actor.id();
        let mut record = self
            .ledger
            .find(user_id, task_id)
            .await?
            .ok_or(TaskServiceError::ProgressNotFound { task_id, user_id })?;
        if !record.is_owned_by(user_id) {
            return Err(TaskServiceError::NotRecordOwner { task_id, user_id });
        }
        record.transition_to(target, &*self.clock)?;

        if target != ProgressStatus::Completed {
            self.ledger.save(&record).await?;
            tracing::info!(%task_id, %user_id, status = %target, "progress updated");
            return Ok(record);
        }

        let project_id = task.project_id();
        let mut project = self
            .projects
            .find_by_id(project_id)
            .await?
            .ok_or(TaskServiceError::ProjectNotFound(project_id))?;
        project.credit(user_id, task.score(), &*self.clock)?;
        self.ledger.save(&record).await?;
        self.projects.update(&project).await?;
        tracing::info!(%task_id, %user_id, points = task.score(), "task completed, score credited");
        Ok(record)
    }

    async fn find_task(&self, task_id: TaskId) -> TaskServiceResult<Task> {
        self.tasks
            .find_by_id(task_id)
            .await?
            .ok_or(TaskServiceError::TaskNotFound(task_id))
    }
}
