//! Adapter contracts of the in-memory stores.

use assignment_tracker::identity::{
    adapters::memory::InMemoryUserDirectory,
    domain::{Role, User, UserId},
    ports::UserDirectory,
};
use assignment_tracker::progress::{
    adapters::memory::InMemoryProgressRepository,
    domain::ProgressRecord,
    ports::{ProgressRepository, ProgressRepositoryError},
};
use assignment_tracker::project::{
    adapters::memory::InMemoryProjectRepository,
    domain::{AssignmentWindow, Project},
    ports::{ProjectRepository, ProjectRepositoryError},
};
use assignment_tracker::task::{
    adapters::memory::InMemoryTaskRepository,
    domain::Task,
    ports::{TaskRepository, TaskRepositoryError},
};
use chrono::{Duration, Utc};
use mockable::DefaultClock;
use rstest::rstest;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn project_store_rejects_duplicates_and_missing_updates() -> Result<(), eyre::Report> {
    let repo = InMemoryProjectRepository::new();
    let project = Project::new("Apollo", None, &DefaultClock)?;
    repo.store(&project).await?;

    let duplicate = repo.store(&project).await;
    let stranger = Project::new("Gemini", None, &DefaultClock)?;
    let missing = repo.update(&stranger).await;

    eyre::ensure!(
        matches!(duplicate, Err(ProjectRepositoryError::DuplicateProject(id)) if id == project.id()),
        "expected duplicate error, got {duplicate:?}"
    );
    eyre::ensure!(
        matches!(missing, Err(ProjectRepositoryError::NotFound(_))),
        "expected not-found error, got {missing:?}"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn projects_list_in_insertion_order_and_filter_by_assignee() -> Result<(), eyre::Report> {
    let repo = InMemoryProjectRepository::new();
    let user_id = UserId::new();
    let mut names = Vec::new();
    for name in ["Mercury", "Gemini", "Apollo"] {
        let mut project = Project::new(name, None, &DefaultClock)?;
        if name != "Gemini" {
            let window = AssignmentWindow::new(
                Utc::now() + Duration::hours(1),
                Utc::now() + Duration::days(3),
                Utc::now().date_naive(),
            )?;
            project.assign(user_id, window, &DefaultClock)?;
        }
        repo.store(&project).await?;
        names.push(name);
    }

    let all: Vec<String> = repo
        .list_all()
        .await?
        .iter()
        .map(|project| project.name().to_owned())
        .collect();
    let assigned: Vec<String> = repo
        .list_assigned_to(user_id)
        .await?
        .iter()
        .map(|project| project.name().to_owned())
        .collect();

    eyre::ensure!(all == names, "unexpected order {all:?}");
    eyre::ensure!(assigned == ["Mercury", "Apollo"], "unexpected filter {assigned:?}");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn task_store_indexes_by_project() -> Result<(), eyre::Report> {
    let repo = InMemoryTaskRepository::new();
    let project = Project::new("Apollo", None, &DefaultClock)?;
    let other = Project::new("Gemini", None, &DefaultClock)?;
    let first = Task::new(project.id(), "design", "draw", 10, &DefaultClock)?;
    let second = Task::new(project.id(), "build", "weld", 10, &DefaultClock)?;
    let elsewhere = Task::new(other.id(), "fly", "go", 10, &DefaultClock)?;
    for task in [&first, &second, &elsewhere] {
        repo.store(task).await?;
    }

    repo.delete(first.id()).await?;
    let remaining = repo.list_by_project(project.id()).await?;
    let again = repo.delete(first.id()).await;

    eyre::ensure!(remaining == vec![second], "unexpected tasks {remaining:?}");
    eyre::ensure!(
        matches!(again, Err(TaskRepositoryError::NotFound(_))),
        "expected not-found error, got {again:?}"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn progress_store_finds_by_pair_and_purges_by_task() -> Result<(), eyre::Report> {
    let repo = InMemoryProgressRepository::new();
    let project = Project::new("Apollo", None, &DefaultClock)?;
    let task = Task::new(project.id(), "design", "draw", 10, &DefaultClock)?;
    let ada = UserId::new();
    let brian = UserId::new();
    let record = ProgressRecord::pending(ada, project.id(), task.id(), &DefaultClock);
    repo.store(&record).await?;
    repo.store(&ProgressRecord::pending(brian, project.id(), task.id(), &DefaultClock))
        .await?;

    let found = repo.find_by_user_and_task(ada, task.id()).await?;
    let duplicate = repo.store(&record).await;
    let purged = repo.delete_by_task(task.id()).await?;

    eyre::ensure!(found.as_ref() == Some(&record), "pair lookup failed");
    eyre::ensure!(
        matches!(duplicate, Err(ProgressRepositoryError::DuplicateProgress(_))),
        "expected duplicate error, got {duplicate:?}"
    );
    eyre::ensure!(purged == 2, "expected two purged records, got {purged}");
    eyre::ensure!(repo.list_by_task(task.id()).await?.is_empty(), "records survived purge");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn user_directory_returns_inserted_users() -> Result<(), eyre::Report> {
    let directory = InMemoryUserDirectory::new();
    let user = User::new(UserId::new(), "ada", "ada@example.com", Role::Admin);
    directory.insert(user.clone())?;

    eyre::ensure!(directory.find_by_id(user.id()).await? == Some(user), "user missing");
    eyre::ensure!(
        directory.find_by_id(UserId::new()).await?.is_none(),
        "unknown user found"
    );
    Ok(())
}
