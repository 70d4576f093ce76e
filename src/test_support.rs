//! Shared fixtures for unit tests that exercise services over in-memory
//! stores.

use crate::identity::{
    adapters::memory::InMemoryUserDirectory,
    domain::{Actor, Role, User, UserId},
};
use crate::progress::adapters::memory::InMemoryProgressRepository;
use crate::project::{adapters::memory::InMemoryProjectRepository, services::ProjectService};
use crate::task::{adapters::memory::InMemoryTaskRepository, services::TaskService};
use chrono::{Days, Utc};
use mockable::DefaultClock;
use std::sync::Arc;

pub type TestProjectService = ProjectService<
    InMemoryProjectRepository,
    InMemoryTaskRepository,
    InMemoryProgressRepository,
    InMemoryUserDirectory,
    DefaultClock,
>;

pub type TestTaskService = TaskService<
    InMemoryProjectRepository,
    InMemoryTaskRepository,
    InMemoryProgressRepository,
    InMemoryUserDirectory,
    DefaultClock,
>;

/// Both services wired over one set of in-memory stores.
pub struct Harness {
    pub projects: Arc<InMemoryProjectRepository>,
    pub tasks: Arc<InMemoryTaskRepository>,
    pub progress: Arc<InMemoryProgressRepository>,
    pub users: Arc<InMemoryUserDirectory>,
    pub project_service: TestProjectService,
    pub task_service: TestTaskService,
    pub admin: Actor,
}

impl Harness {
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
            Arc::clone(&tasks),
            Arc::clone(&progress),
            Arc::clone(&users),
            clock,
        );
        Self {
            projects,
            tasks,
            progress,
            users,
            project_service,
            task_service,
            admin: Actor::admin(UserId::new()),
        }
    }

    /// Registers a member and returns their actor.
    pub fn member(&self, first_name: &str) -> Actor {
        let id = UserId::new();
        let username = first_name.to_lowercase();
        let user = User::new(id, username.clone(), format!("{username}@example.com"), Role::Member)
            .with_name(first_name, "Tester");
        self.users.insert(user).expect("user insert should succeed");
        Actor::member(id)
    }
}

/// `YYYY-MM-DD` for `offset` days from today.
pub fn day(offset: u64) -> String {
    let today = Utc::now().date_naive();
    today
        .checked_add_days(Days::new(offset))
        .expect("date in range")
        .format("%Y-%m-%d")
        .to_string()
}
