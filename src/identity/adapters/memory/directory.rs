//! In-memory user directory for tests and embedded use.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::identity::{
    domain::{User, UserId},
    ports::{UserDirectory, UserDirectoryError, UserDirectoryResult},
};

/// Thread-safe in-memory user directory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryUserDirectory {
    users: Arc<RwLock<HashMap<UserId, User>>>,
}

impl InMemoryUserDirectory {
    /// Creates an empty directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers or replaces a user.
    ///
    /// # Errors
    ///
    /// Returns [`UserDirectoryError::Persistence`] when the lock is poisoned.
    pub fn insert(&self, user: User) -> UserDirectoryResult<()> {
        let mut users = self.users.write().map_err(|err| {
            UserDirectoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        users.insert(user.id(), user);
        Ok(())
    }
}

#[async_trait]
impl UserDirectory for InMemoryUserDirectory {
    async fn find_by_id(&self, id: UserId) -> UserDirectoryResult<Option<User>> {
        let users = self.users.read().map_err(|err| {
            UserDirectoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(users.get(&id).cloned())
    }
}
