//! Diesel row models for task persistence.

use super::schema::tasks;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde_json::Value;

/// Query result row for task records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskRow {
    /// Internal task identifier.
    pub id: uuid::Uuid,
    /// Owning project identifier.
    pub project_id: uuid::Uuid,
    /// Task name.
    pub name: String,
    /// Task description.
    pub description: String,
    /// Point value.
    pub score: i64,
    /// Progress record identifiers payload.
    pub progress_ids: Value,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Insert model for task records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = tasks)]
pub struct NewTaskRow {
    /// Internal task identifier.
    pub id: uuid::Uuid,
    /// Owning project identifier.
    pub project_id: uuid::Uuid,
    /// Task name.
    pub name: String,
    /// Task description.
    pub description: String,
    /// Point value.
    pub score: i64,
    /// Progress record identifiers payload.
    pub progress_ids: Value,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}
