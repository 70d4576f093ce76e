//! Fan-out creation and cascade deletion of progress records.

use crate::identity::domain::UserId;
use crate::progress::{
    domain::ProgressRecord,
    ports::{ProgressRepository, ProgressRepositoryResult},
};
use crate::task::domain::{Task, TaskId};
use mockable::Clock;
use std::sync::Arc;

/// Creates, looks up and removes progress records on behalf of the project
/// and task services.
///
/// Creation is skip-if-exists: a (user, task) pair that already has a record
/// keeps it, so replaying a partially-failed fan-out does not duplicate
/// records. The check and the insert are separate store calls.
#[derive(Clone)]
pub struct ProgressLedger<G, C>
where
    G: ProgressRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<G>,
    clock: Arc<C>,
}

impl<G, C> ProgressLedger<G, C>
where
    G: ProgressRepository,
    C: Clock + Send + Sync,
{
    /// Creates a ledger over `repository`.
    #[must_use]
    pub const fn new(repository: Arc<G>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Ensures `user_id` has a record for every task in `tasks`.
    ///
    /// Returns the record of each task, in task order, whether newly created
    /// or pre-existing.
    ///
    /// # Errors
    ///
    /// Returns the first repository failure; records created before it are
    /// kept.
    pub async fn enrol_user(
        &self,
        user_id: UserId,
        tasks: &[Task],
    ) -> ProgressRepositoryResult<Vec<ProgressRecord>> {
        let mut records = Vec::with_capacity(tasks.len());
        for task in tasks {
            records.push(self.ensure_record(user_id, task).await?);
        }
        Ok(records)
    }

    /// Ensures every user in `user_ids` has a record for `task`.
    ///
    /// # Errors
    ///
    /// Returns the first repository failure; records created before it are
    /// kept.
    pub async fn enrol_task(
        &self,
        task: &Task,
        user_ids: &[UserId],
    ) -> ProgressRepositoryResult<Vec<ProgressRecord>> {
        let mut records = Vec::with_capacity(user_ids.len());
        for user_id in user_ids {
            records.push(self.ensure_record(*user_id, task).await?);
        }
        Ok(records)
    }

    /// Finds the record of `user_id` for `task_id`.
    ///
    /// # Errors
    ///
    /// Returns the repository failure, if any.
    pub async fn find(
        &self,
        user_id: UserId,
        task_id: TaskId,
    ) -> ProgressRepositoryResult<Option<ProgressRecord>> {
        self.repository.find_by_user_and_task(user_id, task_id).await
    }

    /// Persists a record whose status has changed.
    ///
    /// # Errors
    ///
    /// Returns the repository failure, if any.
    pub async fn save(&self, record: &ProgressRecord) -> ProgressRepositoryResult<()> {
        self.repository.update(record).await
    }

    /// Deletes every record of `task_id`, returning how many were removed.
    ///
    /// # Errors
    ///
    /// Returns the repository failure, if any.
    pub async fn purge_task(&self, task_id: TaskId) -> ProgressRepositoryResult<usize> {
        let removed = self.repository.delete_by_task(task_id).await?;
        tracing::debug!(%task_id, removed, "purged progress records");
        Ok(removed)
    }

    async fn ensure_record(
        &self,
        user_id: UserId,
        task: &Task,
    ) -> ProgressRepositoryResult<ProgressRecord> {
        if let Some(existing) = self
            .repository
            .find_by_user_and_task(user_id, task.id())
            .await?
        {
            tracing::debug!(
                %user_id,
                task_id = %task.id(),
                progress_id = %existing.id(),
                "progress record already present, skipping"
            );
            return Ok(existing);
        }
        let record = ProgressRecord::pending(user_id, task.project_id(), task.id(), &*self.clock);
        self.repository.store(&record).await?;
        Ok(record)
    }
}
