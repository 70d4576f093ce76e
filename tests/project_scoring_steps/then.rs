//! Then steps for project scoring BDD scenarios.

use super::world::{ScoringWorld, run_async};
use assignment_tracker::{
    error::ErrorKind,
    progress::{domain::ProgressStatus, ports::ProgressRepository},
    project::{domain::Project, ports::ProjectRepository},
};
use rstest_bdd_macros::then;

fn stored_project(world: &ScoringWorld) -> Result<Project, eyre::Report> {
    let project_id = world.project()?.id();
    run_async(world.projects.find_by_id(project_id))?
        .ok_or_else(|| eyre::eyre!("project missing from store"))
}

#[then("the member has a pending progress record")]
fn member_has_pending_record(world: &ScoringWorld) -> Result<(), eyre::Report> {
    let member = world.member()?;
    let task_id = world
        .tasks
        .first()
        .map(|task| task.id())
        .ok_or_else(|| eyre::eyre!("missing task in scenario world"))?;
    let record = run_async(world.progress.find_by_user_and_task(member.id(), task_id))?
        .ok_or_else(|| eyre::eyre!("member has no progress record"))?;

    if record.status() != ProgressStatus::Pending {
        return Err(eyre::eyre!("expected pending record, found {}", record.status()));
    }
    Ok(())
}

#[then("the member has {count:usize} progress records")]
fn member_has_records(world: &ScoringWorld, count: usize) -> Result<(), eyre::Report> {
    let member = world.member()?;
    let mut found = 0;
    for task in &world.tasks {
        if run_async(world.progress.find_by_user_and_task(member.id(), task.id()))?.is_some() {
            found += 1;
        }
    }
    if found != count {
        return Err(eyre::eyre!("expected {count} records, found {found}"));
    }
    Ok(())
}

#[then("the member's score is {score:i64}")]
fn member_score_is(world: &ScoringWorld, score: i64) -> Result<(), eyre::Report> {
    let member = world.member()?;
    let actual = stored_project(world)?.score_of(member.id());
    if actual != Some(score) {
        return Err(eyre::eyre!("expected score {score}, found {actual:?}"));
    }
    Ok(())
}

#[then("the project total score is {total:i64}")]
fn project_total_is(world: &ScoringWorld, total: i64) -> Result<(), eyre::Report> {
    let actual = stored_project(world)?.total_score();
    if actual != total {
        return Err(eyre::eyre!("expected total {total}, found {actual}"));
    }
    Ok(())
}

#[then("the last progress update fails with a conflict")]
fn last_update_conflicts(world: &ScoringWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_progress_result
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing progress result"))?;

    if result.as_ref().err().map(|err| err.kind()) != Some(ErrorKind::Conflict) {
        return Err(eyre::eyre!("expected conflict, got {result:?}"));
    }
    Ok(())
}
