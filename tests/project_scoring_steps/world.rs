//! Shared world state for project scoring BDD scenarios.

use std::sync::Arc;

use assignment_tracker::{
    identity::{
        adapters::memory::InMemoryUserDirectory,
        domain::{Actor, UserId},
    },
    progress::{adapters::memory::InMemoryProgressRepository, domain::ProgressRecord},
    project::{
        adapters::memory::InMemoryProjectRepository, domain::Project, services::ProjectService,
    },
    task::{
        adapters::memory::InMemoryTaskRepository,
        domain::Task,
        services::{TaskService, TaskServiceError},
    },
};
use mockable::DefaultClock;
use rstest::fixture;

/// Project service type used by the BDD world.
pub type WorldProjectService = ProjectService<
    InMemoryProjectRepository,
    InMemoryTaskRepository,
    InMemoryProgressRepository,
    InMemoryUserDirectory,
    DefaultClock,
>;

/// Task service type used by the BDD world.
pub type WorldTaskService = TaskService<
    InMemoryProjectRepository,
    InMemoryTaskRepository,
    InMemoryProgressRepository,
    InMemoryUserDirectory,
    DefaultClock,
>;

/// Scenario world for project scoring behaviour tests.
pub struct ScoringWorld {
    pub projects: Arc<InMemoryProjectRepository>,
    pub progress: Arc<InMemoryProgressRepository>,
    pub users: Arc<InMemoryUserDirectory>,
    pub project_service: WorldProjectService,
    pub task_service: WorldTaskService,
    pub admin: Actor,
    pub project: Option<Project>,
    pub tasks: Vec<Task>,
    pub member: Option<Actor>,
    pub last_progress_result: Option<Result<ProgressRecord, TaskServiceError>>,
}

impl ScoringWorld {
    /// Creates a world over empty in-memory stores.
    #[must_use]
    pub fn new() -> Self {
        let projects = Arc::new(InMemoryProjectRepository::new());
        let tasks = Arc::new(InMemoryTaskRepository::new());
        let progress = Arc::new(InMemoryProgressRepository::new());
        let users = Arc::new(InMemoryUserDirectory::new());
        let clock = Arc::new(DefaultClock);
        let project_service = ProjectService::new(
            Arc::clone(&projects),
            Arc::clone(&tasks),
            Arc::clone(&progress),
            Arc::clone(&users),
            Arc::clone(&clock),
        );
        let task_service = TaskService::new(
            Arc::clone(&projects),
            tasks,
            Arc::clone(&progress),
            Arc::clone(&users),
            clock,
        );

        Self {
            projects,
            progress,
            users,
            project_service,
            task_service,
            admin: Actor::admin(UserId::new()),
            project: None,
            tasks: Vec::new(),
            member: None,
            last_progress_result: None,
        }
    }

    /// Returns the project created by a previous step.
    ///
    /// # Errors
    ///
    /// Returns an error when no project step has run.
    pub fn project(&self) -> Result<&Project, eyre::Report> {
        self.project
            .as_ref()
            .ok_or_else(|| eyre::eyre!("missing project in scenario world"))
    }

    /// Returns the member registered by a previous step.
    ///
    /// # Errors
    ///
    /// Returns an error when no member step has run.
    pub fn member(&self) -> Result<Actor, eyre::Report> {
        self.member
            .ok_or_else(|| eyre::eyre!("missing member in scenario world"))
    }
}

impl Default for ScoringWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> ScoringWorld {
    ScoringWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
