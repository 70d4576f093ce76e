//! Diesel row models for progress persistence.

use super::schema::progress_records;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for progress records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = progress_records)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ProgressRow {
    /// Record identifier.
    pub id: uuid::Uuid,
    /// Owning user.
    pub user_id: uuid::Uuid,
    /// Project of the tracked task.
    pub project_id: uuid::Uuid,
    /// Tracked task.
    pub task_id: uuid::Uuid,
    /// Completion status.
    pub status: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Insert model for progress records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = progress_records)]
pub struct NewProgressRow {
    /// Record identifier.
    pub id: uuid::Uuid,
    /// Owning user.
    pub user_id: uuid::Uuid,
    /// Project of the tracked task.
    pub project_id: uuid::Uuid,
    /// Tracked task.
    pub task_id: uuid::Uuid,
    /// Completion status.
    pub status: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}
