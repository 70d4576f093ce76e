//! Service layer for project lifecycle, assignment and reads.

use super::views::{ProjectSummary, ProjectView};
use crate::error::ErrorKind;
use crate::identity::{
    domain::{Actor, AuthorizationError, Role, User, UserId},
    ports::{UserDirectory, UserDirectoryError},
};
use crate::progress::{
    ports::{ProgressRepository, ProgressRepositoryError},
    services::ProgressLedger,
};
use crate::project::{
    domain::{AssignmentWindow, Project, ProjectDomainError, ProjectId},
    ports::{ProjectRepository, ProjectRepositoryError},
};
use crate::task::{
    domain::Task,
    ports::{TaskRepository, TaskRepositoryError},
};
use mockable::Clock;
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;

/// Request payload for creating a project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateProjectRequest {
    name: String,
    description: Option<String>,
}

impl CreateProjectRequest {
    /// Creates a request with the required name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
        }
    }

    /// Sets the project description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Request payload for assigning a user to a project.
///
/// Dates stay in their textual form until the service validates them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignUserRequest {
    project_id: ProjectId,
    user_id: UserId,
    start_date: Option<String>,
    end_date: Option<String>,
}

impl AssignUserRequest {
    /// Creates a request without dates.
    #[must_use]
    pub const fn new(project_id: ProjectId, user_id: UserId) -> Self {
        Self {
            project_id,
            user_id,
            start_date: None,
            end_date: None,
        }
    }

    /// Sets the assignment start date.
    #[must_use]
    pub fn with_start_date(mut self, start_date: impl Into<String>) -> Self {
        self.start_date = Some(start_date.into());
        self
    }

    /// Sets the assignment end date.
    #[must_use]
    pub fn with_end_date(mut self, end_date: impl Into<String>) -> Self {
        self.end_date = Some(end_date.into());
        self
    }
}

/// Request payload for a partial project update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateProjectRequest {
    project_id: ProjectId,
    name: Option<String>,
    description: Option<String>,
}

impl UpdateProjectRequest {
    /// Creates a request that changes nothing.
    #[must_use]
    pub const fn new(project_id: ProjectId) -> Self {
        Self {
            project_id,
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

/// Outcome of removing a user from a project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoveUserOutcome {
    /// The assignment was removed; carries the updated project.
    Removed(Project),
    /// The user held no assignment; nothing changed.
    NotAssigned,
}

/// Service-level errors for project operations.
#[derive(Debug, Error)]
pub enum ProjectServiceError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] ProjectDomainError),
    /// The actor lacks the required role.
    #[error(transparent)]
    Authorization(#[from] AuthorizationError),
    /// The addressed project does not exist.
    #[error("project not found: {0}")]
    ProjectNotFound(ProjectId),
    /// The referenced user does not exist.
    #[error("user not found: {0}")]
    UserNotFound(UserId),
    /// The actor is neither an administrator nor assigned to the project.
    #[error("user {user_id} may not access project {project_id}")]
    NotAMember {
        /// Project that was addressed.
        project_id: ProjectId,
        /// Caller that was refused.
        user_id: UserId,
    },
    /// Project repository operation failed.
    #[error(transparent)]
    Repository(#[from] ProjectRepositoryError),
    /// Task repository operation failed.
    #[error(transparent)]
    TaskRepository(#[from] TaskRepositoryError),
    /// Progress repository operation failed.
    #[error(transparent)]
    ProgressRepository(#[from] ProgressRepositoryError),
    /// User lookup failed.
    #[error(transparent)]
    Directory(#[from] UserDirectoryError),
}

impl ProjectServiceError {
    /// Returns the category of this failure.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Domain(err) if err.is_conflict() => ErrorKind::Conflict,
            Self::Domain(_) => ErrorKind::Validation,
            Self::Authorization(_) => ErrorKind::PermissionDenied,
            Self::NotAMember { .. } => ErrorKind::Forbidden,
            Self::ProjectNotFound(_)
            | Self::UserNotFound(_)
            | Self::Repository(ProjectRepositoryError::NotFound(_)) => ErrorKind::NotFound,
            Self::Repository(_)
            | Self::TaskRepository(_)
            | Self::ProgressRepository(_)
            | Self::Directory(_) => ErrorKind::Internal,
        }
    }
}

/// Result type for project service operations.
pub type ProjectServiceResult<T> = Result<T, ProjectServiceError>;

/// Project orchestration service.
#[derive(Clone)]
pub struct ProjectService<P, T, G, U, C>
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
}

impl<P, T, G, U, C> ProjectService<P, T, G, U, C>
where
    P: ProjectRepository,
    T: TaskRepository,
    G: ProgressRepository,
    U: UserDirectory,
    C: Clock + Send + Sync,
{
    /// Creates a new project service.
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
        }
    }

    /// Lists the projects visible to `actor`, joined with their users and
    /// tasks.
    ///
    /// Administrators see every project; other callers see the projects they
    /// are assigned to. An empty list is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectServiceError`] when a store lookup fails.
    pub async fn list(&self, actor: &Actor) -> ProjectServiceResult<Vec<ProjectSummary>> {
        let projects = if actor.is_admin() {
            self.projects.list_all().await?
        } else {
            self.projects.list_assigned_to(actor.id()).await?
        };

        let mut users: HashMap<UserId, User> = HashMap::new();
        let mut summaries = Vec::with_capacity(projects.len());
        for project in &projects {
            for user_id in project.assigned_user_ids() {
                if users.contains_key(&user_id) {
                    continue;
                }
                if let Some(user) = self.users.find_by_id(user_id).await? {
                    users.insert(user_id, user);
                }
            }
            let tasks = self.tasks.list_by_project(project.id()).await?;
            summaries.push(ProjectSummary::join(project, &users, &tasks));
        }
        tracing::debug!(actor = %actor.id(), count = summaries.len(), "listed projects");
        Ok(summaries)
    }

    /// Creates an empty project.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectServiceError::Authorization`] for non-admin callers,
    /// [`ProjectServiceError::Domain`] when the name is blank, or a
    /// repository failure.
    pub async fn create(
        &self,
        actor: &Actor,
        request: CreateProjectRequest,
    ) -> ProjectServiceResult<Project> {
        actor.require_role(Role::Admin)?;
        let project = Project::new(request.name, request.description, &*self.clock)?;
        self.projects.store(&project).await?;
        tracing::info!(project_id = %project.id(), name = project.name(), "project created");
        Ok(project)
    }

    /// Assigns a user to a project for a date window.
    ///
    /// Checks run in order: caller role, user existence, date validity,
    /// project existence, duplicate assignment. On success every task of the
    /// project gains a pending progress record for the user; records that
    /// already exist are reused.
    ///
    /// # Errors
    ///
    /// Returns the first failing check as [`ProjectServiceError`], or a
    /// repository failure.
    pub async fn assign_user(
        &self,
        actor: &Actor,
        request: AssignUserRequest,
    ) -> ProjectServiceResult<Project> {
        actor.require_role(Role::Admin)?;
        let AssignUserRequest {
            project_id,
            user_id,
            start_date,
            end_date,
        } = request;

        if self.users.find_by_id(user_id).await?.is_none() {
            return Err(ProjectServiceError::UserNotFound(user_id));
        }
        let today = self.clock.utc().date_naive();
        let window = AssignmentWindow::parse(start_date.as_deref(), end_date.as_deref(), today)?;
        let mut project = self.find_project(project_id).await?;
        project.assign(user_id, window, &*self.clock)?;

        let tasks = self.tasks.list_by_project(project_id).await?;
        let records = self.ledger.enrol_user(user_id, &tasks).await?;
        for (mut task, record) in tasks.into_iter().zip(records) {
            if task.attach_progress([record.id()], &*self.clock) {
                self.tasks.update(&task).await?;
            }
        }

        self.projects.update(&project).await?;
        tracing::info!(%project_id, %user_id, "user assigned to project");
        Ok(project)
    }

    /// Removes a user's assignment.
    ///
    /// The user's score entry and progress records are kept.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectServiceError::ProjectNotFound`] when the project is
    /// absent, or a repository failure.
    pub async fn remove_user(
        &self,
        project_id: ProjectId,
        user_id: UserId,
    ) -> ProjectServiceResult<RemoveUserOutcome> {
        let mut project = self.find_project(project_id).await?;
        if !project.unassign(user_id, &*self.clock) {
            tracing::debug!(%project_id, %user_id, "user not assigned, nothing removed");
            return Ok(RemoveUserOutcome::NotAssigned);
        }
        self.projects.update(&project).await?;
        tracing::info!(%project_id, %user_id, "user removed from project");
        Ok(RemoveUserOutcome::Removed(project))
    }

    /// Reads one project, shaped for `actor`.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectServiceError::ProjectNotFound`],
    /// [`ProjectServiceError::NotAMember`] when a non-admin caller is not
    /// assigned, or a repository failure.
    pub async fn get(&self, actor: &Actor, project_id: ProjectId) -> ProjectServiceResult<ProjectView> {
        let project = self.find_project(project_id).await?;
        if !actor.is_admin() && !project.is_assigned(actor.id()) {
            return Err(ProjectServiceError::NotAMember {
                project_id,
                user_id: actor.id(),
            });
        }
        let tasks: Vec<Task> = self.tasks.list_by_project(project_id).await?;
        Ok(ProjectView::for_actor(&project, &tasks, actor))
    }

    /// Applies a partial update of name and description.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectServiceError::Authorization`] for non-admin callers,
    /// [`ProjectServiceError::ProjectNotFound`], or a repository failure.
    pub async fn update(
        &self,
        actor: &Actor,
        request: UpdateProjectRequest,
    ) -> ProjectServiceResult<Project> {
        actor.require_role(Role::Admin)?;
        let mut project = self.find_project(request.project_id).await?;
        project.apply_update(request.name, request.description, &*self.clock);
        self.projects.update(&project).await?;
        tracing::info!(project_id = %project.id(), "project updated");
        Ok(project)
    }

    /// Deletes a project together with its tasks and their progress records.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectServiceError::Authorization`] for non-admin callers,
    /// [`ProjectServiceError::ProjectNotFound`], or a repository failure.
    pub async fn delete(&self, actor: &Actor, project_id: ProjectId) -> ProjectServiceResult<()> {
        actor.require_role(Role::Admin)?;
        let project = self.find_project(project_id).await?;
        let tasks = self.tasks.list_by_project(project.id()).await?;
        for task in &tasks {
            self.ledger.purge_task(task.id()).await?;
            self.tasks.delete(task.id()).await?;
        }
        self.projects.delete(project_id).await?;
        tracing::info!(%project_id, tasks = tasks.len(), "project deleted");
        Ok(())
    }

    async fn find_project(&self, project_id: ProjectId) -> ProjectServiceResult<Project> {
        self.projects
            .find_by_id(project_id)
            .await?
            .ok_or(ProjectServiceError::ProjectNotFound(project_id))
    }
}
