//! Repository port for project documents.

use crate::identity::domain::UserId;
use crate::project::domain::{Project, ProjectId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for project repository operations.
pub type ProjectRepositoryResult<T> = Result<T, ProjectRepositoryError>;

/// Project persistence contract.
///
/// Every method reads or writes a single document; callers sequencing
/// several calls get no cross-document atomicity.
#[async_trait]
pub trait ProjectRepository: Send + Sync {
    /// Stores a new project.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectRepositoryError::DuplicateProject`] when the
    /// identifier already exists.
    async fn store(&self, project: &Project) -> ProjectRepositoryResult<()>;

    /// Replaces an existing project document.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectRepositoryError::NotFound`] when the project does
    /// not exist.
    async fn update(&self, project: &Project) -> ProjectRepositoryResult<()>;

    /// Finds a project by identifier.
    ///
    /// Returns `None` when the project does not exist.
    async fn find_by_id(&self, id: ProjectId) -> ProjectRepositoryResult<Option<Project>>;

    /// Returns every project, oldest first.
    async fn list_all(&self) -> ProjectRepositoryResult<Vec<Project>>;

    /// Returns the projects `user_id` is assigned to, oldest first.
    async fn list_assigned_to(&self, user_id: UserId) -> ProjectRepositoryResult<Vec<Project>>;

    /// Deletes a project.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectRepositoryError::NotFound`] when the project does
    /// not exist.
    async fn delete(&self, id: ProjectId) -> ProjectRepositoryResult<()>;
}

/// Errors returned by project repository implementations.
#[derive(Debug, Clone, Error)]
pub enum ProjectRepositoryError {
    /// A project with the same identifier already exists.
    #[error("duplicate project identifier: {0}")]
    DuplicateProject(ProjectId),

    /// The project was not found.
    #[error("project not found: {0}")]
    NotFound(ProjectId),

    /// Persisted data could not be reconstructed into domain types.
    #[error("invalid persisted project data: {0}")]
    InvalidPersistedData(Arc<dyn std::error::Error + Send + Sync>),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl ProjectRepositoryError {
    /// Wraps a data-quality or deserialization error from persisted rows.
    pub fn invalid_persisted_data(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::InvalidPersistedData(Arc::new(err))
    }

    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
