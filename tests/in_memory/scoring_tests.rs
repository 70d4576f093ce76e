//! Score totals and completion credits across the project and task services.

use super::helpers::{Tracker, tracker};
use assignment_tracker::error::ErrorKind;
use assignment_tracker::progress::{domain::ProgressStatus, ports::ProgressRepository};
use assignment_tracker::project::{domain::ProjectId, ports::ProjectRepository};
use rstest::rstest;

async fn total_of(tracker: &Tracker, project_id: ProjectId) -> Result<i64, eyre::Report> {
    let project = tracker
        .projects
        .find_by_id(project_id)
        .await?
        .ok_or_else(|| eyre::eyre!("project vanished"))?;
    Ok(project.total_score())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn total_score_equals_sum_of_remaining_tasks(tracker: Tracker) -> Result<(), eyre::Report> {
    let project = tracker.project("Apollo").await?;
    let mut tasks = Vec::new();
    for score in [10, 20, 30, 40] {
        tasks.push(tracker.task(project.id(), score).await?);
    }
    eyre::ensure!(total_of(&tracker, project.id()).await? == 100, "expected 100");

    for task in tasks.iter().step_by(2) {
        tracker.task_service.delete(&tracker.admin, task.id()).await?;
    }

    let remaining: i64 = tasks.iter().skip(1).step_by(2).map(|task| task.score()).sum();
    eyre::ensure!(remaining == 60, "fixture sanity");
    eyre::ensure!(
        total_of(&tracker, project.id()).await? == remaining,
        "total diverged from remaining task scores"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn end_to_end_completion_credits_once(tracker: Tracker) -> Result<(), eyre::Report> {
    let project = tracker.project("Apollo").await?;
    let task = tracker.task(project.id(), 10).await?;
    let member = tracker.member("ada")?;
    tracker.assign(project.id(), &member).await?;

    let records = tracker.progress.list_by_task(task.id()).await?;
    let [record] = records.as_slice() else {
        eyre::bail!("expected one record, found {}", records.len());
    };
    eyre::ensure!(record.status() == ProgressStatus::Pending, "record should start pending");

    tracker
        .task_service
        .update_progress(&member, task.id(), "completed")
        .await?;
    let after = tracker
        .projects
        .find_by_id(project.id())
        .await?
        .ok_or_else(|| eyre::eyre!("project vanished"))?;
    eyre::ensure!(after.score_of(member.id()) == Some(10), "score not credited");
    eyre::ensure!(after.total_score() == 10, "total changed by completion");

    let again = tracker
        .task_service
        .update_progress(&member, task.id(), "completed")
        .await;
    eyre::ensure!(
        again.as_ref().err().map(|err| err.kind()) == Some(ErrorKind::Conflict),
        "expected conflict, got {again:?}"
    );
    let unchanged = tracker
        .projects
        .find_by_id(project.id())
        .await?
        .ok_or_else(|| eyre::eyre!("project vanished"))?;
    eyre::ensure!(unchanged.score_of(member.id()) == Some(10), "score credited twice");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deleting_a_task_subtracts_its_score_once(tracker: Tracker) -> Result<(), eyre::Report> {
    let project = tracker.project("Apollo").await?;
    let member = tracker.member("ada")?;
    tracker.assign(project.id(), &member).await?;
    let task = tracker.task(project.id(), 15).await?;
    tracker.task(project.id(), 5).await?;

    tracker.task_service.delete(&tracker.admin, task.id()).await?;
    let second_delete = tracker.task_service.delete(&tracker.admin, task.id()).await;

    eyre::ensure!(
        second_delete.as_ref().err().map(|err| err.kind()) == Some(ErrorKind::NotFound),
        "second delete should report a missing task"
    );
    eyre::ensure!(total_of(&tracker, project.id()).await? == 5, "score subtracted twice");
    eyre::ensure!(
        tracker.progress.list_by_task(task.id()).await?.is_empty(),
        "records of the deleted task survived"
    );
    Ok(())
}
