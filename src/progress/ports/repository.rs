//! Repository port for progress records.

use crate::identity::domain::UserId;
use crate::progress::domain::{ProgressId, ProgressRecord};
use crate::task::domain::TaskId;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for progress repository operations.
pub type ProgressRepositoryResult<T> = Result<T, ProgressRepositoryError>;

/// Progress record persistence contract.
///
/// The store does not enforce one record per (user, task); callers check
/// with [`ProgressRepository::find_by_user_and_task`] before storing.
#[async_trait]
pub trait ProgressRepository: Send + Sync {
    /// Stores a new record.
    ///
    /// # Errors
    ///
    /// Returns [`ProgressRepositoryError::DuplicateProgress`] when the
    /// identifier already exists.
    async fn store(&self, record: &ProgressRecord) -> ProgressRepositoryResult<()>;

    /// Persists a status change.
    ///
    /// # Errors
    ///
    /// Returns [`ProgressRepositoryError::NotFound`] when the record does not
    /// exist.
    async fn update(&self, record: &ProgressRecord) -> ProgressRepositoryResult<()>;

    /// Finds the record of `user_id` for `task_id`.
    ///
    /// Returns `None` when no record exists.
    async fn find_by_user_and_task(
        &self,
        user_id: UserId,
        task_id: TaskId,
    ) -> ProgressRepositoryResult<Option<ProgressRecord>>;

    /// Returns every record of `task_id`, oldest first.
    async fn list_by_task(&self, task_id: TaskId) -> ProgressRepositoryResult<Vec<ProgressRecord>>;

    /// Deletes every record of `task_id`, returning how many were removed.
    async fn delete_by_task(&self, task_id: TaskId) -> ProgressRepositoryResult<usize>;
}

/// Errors returned by progress repository implementations.
#[derive(Debug, Clone, Error)]
pub enum ProgressRepositoryError {
    /// A record with the same identifier already exists.
    #[error("duplicate progress identifier: {0}")]
    DuplicateProgress(ProgressId),

    /// The record was not found.
    #[error("progress record not found: {0}")]
    NotFound(ProgressId),

    /// Persisted data could not be reconstructed into domain types.
    #[error("invalid persisted progress data: {0}")]
    InvalidPersistedData(Arc<dyn std::error::Error + Send + Sync>),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl ProgressRepositoryError {
    /// Wraps a data-quality or deserialization error from persisted rows.
    pub fn invalid_persisted_data(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::InvalidPersistedData(Arc::new(err))
    }

    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
