//! `PostgreSQL` repository implementation for progress records.

use super::{
    models::{NewProgressRow, ProgressRow},
    schema::progress_records,
};
use crate::config::TrackerPgPool;
use crate::identity::domain::UserId;
use crate::progress::{
    domain::{PersistedProgressData, ProgressId, ProgressRecord, ProgressStatus},
    ports::{ProgressRepository, ProgressRepositoryError, ProgressRepositoryResult},
};
use crate::project::domain::ProjectId;
use crate::task::domain::TaskId;
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL`-backed progress repository.
#[derive(Debug, Clone)]
pub struct PostgresProgressRepository {
    pool: TrackerPgPool,
}

impl PostgresProgressRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: TrackerPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> ProgressRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> ProgressRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(ProgressRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(ProgressRepositoryError::persistence)?
    }
}

#[async_trait]
impl ProgressRepository for PostgresProgressRepository {
    async fn store(&self, record: &ProgressRecord) -> ProgressRepositoryResult<()> {
        let progress_id = record.id();
        let new_row = to_new_row(record);

        self.run_blocking(move |connection| {
            diesel::insert_into(progress_records::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        ProgressRepositoryError::DuplicateProgress(progress_id)
                    }
                    _ => ProgressRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn update(&self, record: &ProgressRecord) -> ProgressRepositoryResult<()> {
        let progress_id = record.id();
        let status = record.status().as_str().to_owned();
        let updated_at = record.updated_at();

        self.run_blocking(move |connection| {
            let updated_count = diesel::update(
                progress_records::table.filter(progress_records::id.eq(progress_id.into_inner())),
            )
            .set((
                progress_records::status.eq(&status),
                progress_records::updated_at.eq(updated_at),
            ))
            .execute(connection)
            .map_err(ProgressRepositoryError::persistence)?;
            if updated_count == 0 {
                return Err(ProgressRepositoryError::NotFound(progress_id));
            }
            Ok(())
        })
        .await
    }

    async fn find_by_user_and_task(
        &self,
        user_id: UserId,
        task_id: TaskId,
    ) -> ProgressRepositoryResult<Option<ProgressRecord>> {
        self.run_blocking(move |connection| {
            let row = progress_records::table
                .filter(progress_records::user_id.eq(user_id.into_inner()))
                .filter(progress_records::task_id.eq(task_id.into_inner()))
                .order(progress_records::created_at.asc())
                .select(ProgressRow::as_select())
                .first::<ProgressRow>(connection)
                .optional()
                .map_err(ProgressRepositoryError::persistence)?;
            row.map(row_to_record).transpose()
        })
        .await
    }

    async fn list_by_task(&self, task_id: TaskId) -> ProgressRepositoryResult<Vec<ProgressRecord>> {
        self.run_blocking(move |connection| {
            let rows = progress_records::table
                .filter(progress_records::task_id.eq(task_id.into_inner()))
                .order(progress_records::created_at.asc())
                .select(ProgressRow::as_select())
                .load::<ProgressRow>(connection)
                .map_err(ProgressRepositoryError::persistence)?;
            rows.into_iter().map(row_to_record).collect()
        })
        .await
    }

    async fn delete_by_task(&self, task_id: TaskId) -> ProgressRepositoryResult<usize> {
        self.run_blocking(move |connection| {
            diesel::delete(
                progress_records::table.filter(progress_records::task_id.eq(task_id.into_inner())),
            )
            .execute(connection)
            .map_err(ProgressRepositoryError::persistence)
        })
        .await
    }
}

fn to_new_row(record: &ProgressRecord) -> NewProgressRow {
    NewProgressRow {
        id: record.id().into_inner(),
        user_id: record.user_id().into_inner(),
        project_id: record.project_id().into_inner(),
        task_id: record.task_id().into_inner(),
        status: record.status().as_str().to_owned(),
        created_at: record.created_at(),
        updated_at: record.updated_at(),
    }
}

fn row_to_record(row: ProgressRow) -> ProgressRepositoryResult<ProgressRecord> {
    let ProgressRow {
        id,
        user_id,
        project_id,
        task_id,
        status,
        created_at,
        updated_at,
    } = row;

    let parsed_status = ProgressStatus::try_from(status.as_str())
        .map_err(ProgressRepositoryError::invalid_persisted_data)?;

    Ok(ProgressRecord::from_persisted(PersistedProgressData {
        id: ProgressId::from_uuid(id),
        user_id: UserId::from_uuid(user_id),
        project_id: ProjectId::from_uuid(project_id),
        task_id: TaskId::from_uuid(task_id),
        status: parsed_status,
        created_at,
        updated_at,
    }))
}
