//! In-memory repository for progress records.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::identity::domain::UserId;
use crate::progress::{
    domain::{ProgressId, ProgressRecord},
    ports::{ProgressRepository, ProgressRepositoryError, ProgressRepositoryResult},
};
use crate::task::domain::TaskId;

/// Thread-safe in-memory progress repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryProgressRepository {
    state: Arc<RwLock<InMemoryProgressState>>,
}

#[derive(Debug, Default)]
struct InMemoryProgressState {
    records: HashMap<ProgressId, ProgressRecord>,
    task_index: HashMap<TaskId, Vec<ProgressId>>,
}

impl InMemoryProgressRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_error(err: impl std::fmt::Display) -> ProgressRepositoryError {
    ProgressRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

fn records_of_task(state: &InMemoryProgressState, task_id: TaskId) -> Vec<ProgressRecord> {
    state
        .task_index
        .get(&task_id)
        .map(|ids| {
            ids.iter()
                .filter_map(|id| state.records.get(id).cloned())
                .collect()
        })
        .unwrap_or_default()
}

#[async_trait]
impl ProgressRepository for InMemoryProgressRepository {
    async fn store(&self, record: &ProgressRecord) -> ProgressRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        if state.records.contains_key(&record.id()) {
            return Err(ProgressRepositoryError::DuplicateProgress(record.id()));
        }
        state
            .task_index
            .entry(record.task_id())
            .or_default()
            .push(record.id());
        state.records.insert(record.id(), record.clone());
        Ok(())
    }

    async fn update(&self, record: &ProgressRecord) -> ProgressRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        let slot = state
            .records
            .get_mut(&record.id())
            .ok_or(ProgressRepositoryError::NotFound(record.id()))?;
        *slot = record.clone();
        Ok(())
    }

    async fn find_by_user_and_task(
        &self,
        user_id: UserId,
        task_id: TaskId,
    ) -> ProgressRepositoryResult<Option<ProgressRecord>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(records_of_task(&state, task_id)
            .into_iter()
            .find(|record| record.is_owned_by(user_id)))
    }

    async fn list_by_task(&self, task_id: TaskId) -> ProgressRepositoryResult<Vec<ProgressRecord>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(records_of_task(&state, task_id))
    }

    async fn delete_by_task(&self, task_id: TaskId) -> ProgressRepositoryResult<usize> {
        let mut state = self.state.write().map_err(lock_error)?;
        let ids = state.task_index.remove(&task_id).unwrap_or_default();
        let removed = ids
            .iter()
            .filter_map(|id| state.records.remove(id))
            .count();
        Ok(removed)
    }
}
