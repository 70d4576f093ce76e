//! Shared test helpers for in-memory integration tests.

use std::sync::Arc;

use assignment_tracker::{
    identity::{
        adapters::memory::InMemoryUserDirectory,
        domain::{Actor, Role, User, UserId},
    },
    progress::adapters::memory::InMemoryProgressRepository,
    project::{
        adapters::memory::InMemoryProjectRepository,
        domain::{Project, ProjectId},
        services::{AssignUserRequest, CreateProjectRequest, ProjectService},
    },
    task::{
        adapters::memory::InMemoryTaskRepository,
        domain::Task,
        services::{CreateTaskRequest, TaskService},
    },
};
use chrono::{Days, Utc};
use eyre::WrapErr;
use mockable::DefaultClock;
use rstest::fixture;

/// Project service over in-memory stores.
pub type MemoryProjectService = ProjectService<
    InMemoryProjectRepository,
    InMemoryTaskRepository,
    InMemoryProgressRepository,
    InMemoryUserDirectory,
    DefaultClock,
>;

/// Task service over in-memory stores.
pub type MemoryTaskService = TaskService<
    InMemoryProjectRepository,
    InMemoryTaskRepository,
    InMemoryProgressRepository,
    InMemoryUserDirectory,
    DefaultClock,
>;

/// In-memory stores with both services wired over them.
pub struct Tracker {
    /// Project store.
    pub projects: Arc<InMemoryProjectRepository>,
    /// Task store.
    pub tasks: Arc<InMemoryTaskRepository>,
    /// Progress store.
    pub progress: Arc<InMemoryProgressRepository>,
    /// User directory.
    pub users: Arc<InMemoryUserDirectory>,
    /// Project service.
    pub project_service: MemoryProjectService,
    /// Task service.
    pub task_service: MemoryTaskService,
    /// Administrator acting in the tests.
    pub admin: Actor,
}

/// Provides a fresh tracker for each test.
#[fixture]
pub fn tracker() -> Tracker {
    let projects = Arc::new(InMemoryProjectRepository::new());
    let tasks = Arc::new(InMemoryTaskRepository::new());
    let progress = Arc::new(InMemoryProgressRepository::new());
    let users = Arc::new(InMemoryUserDirectory::new());
    let clock = Arc::new(DefaultClock);
    Tracker {
        project_service: ProjectService::new(
            Arc::clone(&projects),
            Arc::clone(&tasks),
            Arc::clone(&progress),
            Arc::clone(&users),
            Arc::clone(&clock),
        ),
        task_service: TaskService::new(
            Arc::clone(&projects),
            Arc::clone(&tasks),
            Arc::clone(&progress),
            Arc::clone(&users),
            clock,
        ),
        projects,
        tasks,
        progress,
        users,
        admin: Actor::admin(UserId::new()),
    }
}

/// Returns `YYYY-MM-DD` for `offset` days from today.
///
/// # Errors
///
/// Returns an error if the date overflows the calendar.
pub fn day(offset: u64) -> Result<String, eyre::Report> {
    let date = Utc::now()
        .date_naive()
        .checked_add_days(Days::new(offset))
        .ok_or_else(|| eyre::eyre!("date out of range"))?;
    Ok(date.format("%Y-%m-%d").to_string())
}

impl Tracker {
    /// Registers a member and returns their actor.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory rejects the user.
    pub fn member(&self, name: &str) -> Result<Actor, eyre::Report> {
        let id = UserId::new();
        let user = User::new(id, name, format!("{name}@example.com"), Role::Member);
        self.users.insert(user).wrap_err("seed member")?;
        Ok(Actor::member(id))
    }

    /// Creates a project as the administrator.
    ///
    /// # Errors
    ///
    /// Returns an error if project creation fails.
    pub async fn project(&self, name: &str) -> Result<Project, eyre::Report> {
        self.project_service
            .create(&self.admin, CreateProjectRequest::new(name))
            .await
            .wrap_err("create project")
    }

    /// Creates a task with an explicit score.
    ///
    /// # Errors
    ///
    /// Returns an error if task creation fails.
    pub async fn task(&self, project_id: ProjectId, score: i64) -> Result<Task, eyre::Report> {
        self.task_service
            .create(
                &self.admin,
                CreateTaskRequest::new(project_id, "work item", "details").with_score(score),
            )
            .await
            .wrap_err("create task")
    }

    /// Assigns `member` to the project for the next week.
    ///
    /// # Errors
    ///
    /// Returns an error if the assignment fails.
    pub async fn assign(&self, project_id: ProjectId, member: &Actor) -> Result<Project, eyre::Report> {
        let request = AssignUserRequest::new(project_id, member.id())
            .with_start_date(day(0)?)
            .with_end_date(day(7)?);
        self.project_service
            .assign_user(&self.admin, request)
            .await
            .wrap_err("assign member")
    }
}
