//! Diesel row models for project persistence.

use super::schema::projects;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde_json::Value;

/// Query result row for project records.
#[derive(Debug, Clone, Queryable, QueryableByName, Selectable)]
#[diesel(table_name = projects)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ProjectRow {
    /// Project identifier.
    #[diesel(sql_type = diesel::sql_types::Uuid)]
    pub id: uuid::Uuid,
    /// Project name.
    #[diesel(sql_type = diesel::sql_types::Varchar)]
    pub name: String,
    /// Optional description.
    #[diesel(sql_type = diesel::sql_types::Nullable<diesel::sql_types::Text>)]
    pub description: Option<String>,
    /// Assignment list payload.
    #[diesel(sql_type = diesel::sql_types::Jsonb)]
    pub assigned_to: Value,
    /// Referenced task identifiers.
    #[diesel(sql_type = diesel::sql_types::Jsonb)]
    pub task_ids: Value,
    /// Running total of task scores.
    #[diesel(sql_type = diesel::sql_types::Int8)]
    pub total_score: i64,
    /// Per-user score entries.
    #[diesel(sql_type = diesel::sql_types::Jsonb)]
    pub score_by_user: Value,
    /// Creation timestamp.
    #[diesel(sql_type = diesel::sql_types::Timestamptz)]
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    #[diesel(sql_type = diesel::sql_types::Timestamptz)]
    pub updated_at: DateTime<Utc>,
}

/// Insert and changeset model for project records.
#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = projects)]
#[diesel(treat_none_as_null = true)]
pub struct NewProjectRow {
    /// Project identifier.
    pub id: uuid::Uuid,
    /// Project name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// Assignment list payload.
    pub assigned_to: Value,
    /// Referenced task identifiers.
    pub task_ids: Value,
    /// Running total of task scores.
    pub total_score: i64,
    /// Per-user score entries.
    pub score_by_user: Value,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}
