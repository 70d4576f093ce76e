//! When steps for project scoring BDD scenarios.

use super::world::{ScoringWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::when;

#[when(r#"the member marks the task "{status}""#)]
fn member_marks_task(world: &mut ScoringWorld, status: String) -> Result<(), eyre::Report> {
    let member = world.member()?;
    let task_id = world
        .tasks
        .first()
        .map(|task| task.id())
        .ok_or_else(|| eyre::eyre!("missing task in scenario world"))?;

    let result = run_async(world.task_service.update_progress(&member, task_id, &status));
    world.last_progress_result = Some(result);
    Ok(())
}

#[when("the first task is deleted")]
fn first_task_deleted(world: &mut ScoringWorld) -> Result<(), eyre::Report> {
    let task_id = world
        .tasks
        .first()
        .map(|task| task.id())
        .ok_or_else(|| eyre::eyre!("missing task in scenario world"))?;
    run_async(world.task_service.delete(&world.admin, task_id)).wrap_err("delete task")?;
    world.tasks.remove(0);
    Ok(())
}
