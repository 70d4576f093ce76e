//! Assignment fan-out, conflicts and removal.

use super::helpers::{Tracker, day, tracker};
use assignment_tracker::error::ErrorKind;
use assignment_tracker::progress::ports::ProgressRepository;
use assignment_tracker::project::{
    ports::ProjectRepository,
    services::{AssignUserRequest, RemoveUserOutcome},
};
use rstest::rstest;

#[rstest]
#[case(0)]
#[case(1)]
#[case(4)]
#[tokio::test(flavor = "multi_thread")]
async fn assignment_creates_one_record_per_task(
    tracker: Tracker,
    #[case] task_count: usize,
) -> Result<(), eyre::Report> {
    let project = tracker.project("Apollo").await?;
    let mut tasks = Vec::with_capacity(task_count);
    for _ in 0..task_count {
        tasks.push(tracker.task(project.id(), 10).await?);
    }
    let member = tracker.member("ada")?;

    tracker.assign(project.id(), &member).await?;

    let mut total = 0;
    for task in &tasks {
        let records = tracker.progress.list_by_task(task.id()).await?;
        eyre::ensure!(
            records.iter().all(|record| record.user_id() == member.id()),
            "record for the wrong user"
        );
        total += records.len();
    }
    eyre::ensure!(total == task_count, "expected {task_count} records, found {total}");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn task_creation_enrols_every_assigned_user(tracker: Tracker) -> Result<(), eyre::Report> {
    let project = tracker.project("Apollo").await?;
    for name in ["ada", "brian", "carol"] {
        let member = tracker.member(name)?;
        tracker.assign(project.id(), &member).await?;
    }

    let task = tracker.task(project.id(), 10).await?;

    let records = tracker.progress.list_by_task(task.id()).await?;
    eyre::ensure!(records.len() == 3, "expected 3 records, found {}", records.len());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn duplicate_assignment_has_no_side_effects(tracker: Tracker) -> Result<(), eyre::Report> {
    let project = tracker.project("Apollo").await?;
    let task = tracker.task(project.id(), 10).await?;
    let member = tracker.member("ada")?;
    tracker.assign(project.id(), &member).await?;
    let before = tracker.projects.find_by_id(project.id()).await?;

    let request = AssignUserRequest::new(project.id(), member.id())
        .with_start_date(day(1)?)
        .with_end_date(day(2)?);
    let result = tracker.project_service.assign_user(&tracker.admin, request).await;

    eyre::ensure!(
        result.as_ref().err().map(|err| err.kind()) == Some(ErrorKind::Conflict),
        "expected conflict, got {result:?}"
    );
    eyre::ensure!(
        tracker.projects.find_by_id(project.id()).await? == before,
        "project changed"
    );
    eyre::ensure!(
        tracker.progress.list_by_task(task.id()).await?.len() == 1,
        "records duplicated"
    );
    Ok(())
}

#[rstest]
#[case(0, 0)]
#[case(3, 1)]
#[tokio::test(flavor = "multi_thread")]
async fn non_increasing_or_past_windows_are_rejected(
    tracker: Tracker,
    #[case] start_offset: u64,
    #[case] end_offset: u64,
) -> Result<(), eyre::Report> {
    let project = tracker.project("Apollo").await?;
    let member = tracker.member("ada")?;
    let request = AssignUserRequest::new(project.id(), member.id())
        .with_start_date(day(start_offset)?)
        .with_end_date(day(end_offset)?);

    let result = tracker.project_service.assign_user(&tracker.admin, request).await;

    eyre::ensure!(
        result.as_ref().err().map(|err| err.kind()) == Some(ErrorKind::Validation),
        "expected validation error, got {result:?}"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn window_starting_yesterday_is_rejected(tracker: Tracker) -> Result<(), eyre::Report> {
    let project = tracker.project("Apollo").await?;
    let member = tracker.member("ada")?;
    let yesterday = chrono::Utc::now()
        .date_naive()
        .pred_opt()
        .ok_or_else(|| eyre::eyre!("date out of range"))?;
    let request = AssignUserRequest::new(project.id(), member.id())
        .with_start_date(yesterday.format("%Y-%m-%d").to_string())
        .with_end_date(day(3)?);

    let result = tracker.project_service.assign_user(&tracker.admin, request).await;

    eyre::ensure!(
        result.as_ref().err().map(|err| err.kind()) == Some(ErrorKind::Validation),
        "expected validation error, got {result:?}"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn removing_an_unassigned_user_reports_not_assigned(
    tracker: Tracker,
) -> Result<(), eyre::Report> {
    let project = tracker.project("Apollo").await?;
    let ada = tracker.member("ada")?;
    let brian = tracker.member("brian")?;
    tracker.assign(project.id(), &ada).await?;

    let outcome = tracker.project_service.remove_user(project.id(), brian.id()).await?;

    eyre::ensure!(outcome == RemoveUserOutcome::NotAssigned, "unexpected outcome");
    let stored = tracker
        .projects
        .find_by_id(project.id())
        .await?
        .ok_or_else(|| eyre::eyre!("project vanished"))?;
    eyre::ensure!(
        stored.assigned_user_ids().eq([ada.id()]),
        "assignments changed"
    );
    Ok(())
}
