//! Read-only port onto the external account system.

use crate::identity::domain::{User, UserId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for user directory operations.
pub type UserDirectoryResult<T> = Result<T, UserDirectoryError>;

/// User lookup contract.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Finds a user by identifier.
    ///
    /// Returns `None` when the user does not exist.
    async fn find_by_id(&self, id: UserId) -> UserDirectoryResult<Option<User>>;
}

/// Errors returned by user directory implementations.
#[derive(Debug, Clone, Error)]
pub enum UserDirectoryError {
    /// Persisted data could not be reconstructed into domain types.
    #[error("invalid persisted user data: {0}")]
    InvalidPersistedData(Arc<dyn std::error::Error + Send + Sync>),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl UserDirectoryError {
    /// Wraps a data-quality error from persisted rows.
    pub fn invalid_persisted_data(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::InvalidPersistedData(Arc::new(err))
    }

    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
