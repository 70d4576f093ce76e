//! Runtime configuration for the tracker services and their store.

use diesel::pg::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool};

/// Score given to tasks created without an explicit (non-zero) score.
pub const DEFAULT_TASK_SCORE: i64 = 10;

/// Behavioural settings for the project and task services.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackerConfig {
    /// Score applied when a task is created without one.
    pub default_task_score: i64,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            default_task_score: DEFAULT_TASK_SCORE,
        }
    }
}

impl TrackerConfig {
    /// Overrides the default task score.
    #[must_use]
    pub const fn with_default_task_score(mut self, score: i64) -> Self {
        self.default_task_score = score;
        self
    }
}

/// Connection pool shared by every `PostgreSQL` adapter.
pub type TrackerPgPool = Pool<ConnectionManager<PgConnection>>;

/// Settings for the `PostgreSQL` document store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// libpq-style connection URL.
    pub database_url: String,
    /// Upper bound on pooled connections. Values below one are treated as
    /// one.
    pub max_connections: u32,
}

impl StoreConfig {
    /// Default pool size.
    pub const DEFAULT_MAX_CONNECTIONS: u32 = 8;

    /// Creates a configuration for the given database URL.
    #[must_use]
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            max_connections: Self::DEFAULT_MAX_CONNECTIONS,
        }
    }

    /// Overrides the maximum number of pooled connections.
    #[must_use]
    pub const fn with_max_connections(mut self, max_connections: u32) -> Self {
        self.max_connections = max_connections;
        self
    }

    /// Builds a lazily-connecting pool.
    ///
    /// Connections are opened on first checkout, so an unreachable database
    /// surfaces as a persistence error from the first repository call.
    #[must_use]
    pub fn build_pool(&self) -> TrackerPgPool {
        let manager = ConnectionManager::<PgConnection>::new(self.database_url.as_str());
        Pool::builder()
            .max_size(self.max_connections.max(1))
            .build_unchecked(manager)
    }
}
