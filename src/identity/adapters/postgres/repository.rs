//! `PostgreSQL` implementation of the user directory.

use super::{models::UserRow, schema::users};
use crate::config::TrackerPgPool;
use crate::identity::{
    domain::{Role, User, UserId},
    ports::{UserDirectory, UserDirectoryError, UserDirectoryResult},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;

/// `PostgreSQL`-backed user directory.
#[derive(Debug, Clone)]
pub struct PostgresUserDirectory {
    pool: TrackerPgPool,
}

impl PostgresUserDirectory {
    /// Creates a directory from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: TrackerPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> UserDirectoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> UserDirectoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(UserDirectoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(UserDirectoryError::persistence)?
    }
}

#[async_trait]
impl UserDirectory for PostgresUserDirectory {
    async fn find_by_id(&self, id: UserId) -> UserDirectoryResult<Option<User>> {
        self.run_blocking(move |connection| {
            let row = users::table
                .filter(users::id.eq(id.into_inner()))
                .select(UserRow::as_select())
                .first::<UserRow>(connection)
                .optional()
                .map_err(UserDirectoryError::persistence)?;
            row.map(row_to_user).transpose()
        })
        .await
    }
}

fn row_to_user(row: UserRow) -> UserDirectoryResult<User> {
    let UserRow {
        id,
        username,
        email,
        first_name,
        last_name,
        role,
    } = row;
    let parsed_role =
        Role::try_from(role.as_str()).map_err(UserDirectoryError::invalid_persisted_data)?;
    Ok(
        User::new(UserId::from_uuid(id), username, email, parsed_role)
            .with_name(first_name, last_name),
    )
}
