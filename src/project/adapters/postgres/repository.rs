//! `PostgreSQL` repository implementation for project documents.

use super::{
    models::{NewProjectRow, ProjectRow},
    schema::projects,
};
use crate::config::TrackerPgPool;
use crate::identity::domain::UserId;
use crate::project::{
    domain::{PersistedProjectData, Project, ProjectId},
    ports::{ProjectRepository, ProjectRepositoryError, ProjectRepositoryResult},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use serde_json::json;

/// `PostgreSQL`-backed project repository.
#[derive(Debug, Clone)]
pub struct PostgresProjectRepository {
    pool: TrackerPgPool,
}

impl PostgresProjectRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: TrackerPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> ProjectRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> ProjectRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(ProjectRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(ProjectRepositoryError::persistence)?
    }
}

#[async_trait]
impl ProjectRepository for PostgresProjectRepository {
    async fn store(&self, project: &Project) -> ProjectRepositoryResult<()> {
        let project_id = project.id();
        let new_row = to_row(project)?;

        self.run_blocking(move |connection| {
            diesel::insert_into(projects::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        ProjectRepositoryError::DuplicateProject(project_id)
                    }
                    _ => ProjectRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn update(&self, project: &Project) -> ProjectRepositoryResult<()> {
        let project_id = project.id();
        let row = to_row(project)?;

        self.run_blocking(move |connection| {
            let updated_count =
                diesel::update(projects::table.filter(projects::id.eq(project_id.into_inner())))
                    .set(&row)
                    .execute(connection)
                    .map_err(ProjectRepositoryError::persistence)?;
            if updated_count == 0 {
                return Err(ProjectRepositoryError::NotFound(project_id));
            }
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: ProjectId) -> ProjectRepositoryResult<Option<Project>> {
        self.run_blocking(move |connection| {
            let row = projects::table
                .filter(projects::id.eq(id.into_inner()))
                .select(ProjectRow::as_select())
                .first::<ProjectRow>(connection)
                .optional()
                .map_err(ProjectRepositoryError::persistence)?;
            row.map(row_to_project).transpose()
        })
        .await
    }

    async fn list_all(&self) -> ProjectRepositoryResult<Vec<Project>> {
        self.run_blocking(move |connection| {
            let rows = projects::table
                .order(projects::created_at.asc())
                .select(ProjectRow::as_select())
                .load::<ProjectRow>(connection)
                .map_err(ProjectRepositoryError::persistence)?;
            rows.into_iter().map(row_to_project).collect()
        })
        .await
    }

    async fn list_assigned_to(&self, user_id: UserId) -> ProjectRepositoryResult<Vec<Project>> {
        let containment = json!([{ "user_id": user_id.into_inner() }]);
        self.run_blocking(move |connection| {
            let rows = diesel::sql_query(concat!(
                "SELECT id, name, description, assigned_to, task_ids, total_score, ",
                "score_by_user, created_at, updated_at FROM projects ",
                "WHERE assigned_to @> $1 ",
                "ORDER BY created_at ASC",
            ))
            .bind::<diesel::sql_types::Jsonb, _>(containment)
            .load::<ProjectRow>(connection)
            .map_err(ProjectRepositoryError::persistence)?;
            rows.into_iter().map(row_to_project).collect()
        })
        .await
    }

    async fn delete(&self, id: ProjectId) -> ProjectRepositoryResult<()> {
        self.run_blocking(move |connection| {
            let deleted = diesel::delete(projects::table.filter(projects::id.eq(id.into_inner())))
                .execute(connection)
                .map_err(ProjectRepositoryError::persistence)?;
            if deleted == 0 {
                return Err(ProjectRepositoryError::NotFound(id));
            }
            Ok(())
        })
        .await
    }
}

fn to_row(project: &Project) -> ProjectRepositoryResult<NewProjectRow> {
    Ok(NewProjectRow {
        id: project.id().into_inner(),
        name: project.name().to_owned(),
        description: project.description().map(str::to_owned),
        assigned_to: serde_json::to_value(project.assigned_to())
            .map_err(ProjectRepositoryError::persistence)?,
        task_ids: serde_json::to_value(project.task_ids())
            .map_err(ProjectRepositoryError::persistence)?,
        total_score: project.total_score(),
        score_by_user: serde_json::to_value(project.score_by_user())
            .map_err(ProjectRepositoryError::persistence)?,
        created_at: project.created_at(),
        updated_at: project.updated_at(),
    })
}

fn row_to_project(row: ProjectRow) -> ProjectRepositoryResult<Project> {
    let ProjectRow {
        id,
        name,
        description,
        assigned_to,
        task_ids,
        total_score,
        score_by_user,
        created_at,
        updated_at,
    } = row;

    let data = PersistedProjectData {
        id: ProjectId::from_uuid(id),
        name,
        description,
        assigned_to: serde_json::from_value(assigned_to)
            .map_err(ProjectRepositoryError::invalid_persisted_data)?,
        task_ids: serde_json::from_value(task_ids)
            .map_err(ProjectRepositoryError::invalid_persisted_data)?,
        total_score,
        score_by_user: serde_json::from_value(score_by_user)
            .map_err(ProjectRepositoryError::invalid_persisted_data)?,
        created_at,
        updated_at,
    };
    Ok(Project::from_persisted(data))
}
