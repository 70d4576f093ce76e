//! Given steps for project scoring BDD scenarios.

use super::world::{ScoringWorld, run_async};
use assignment_tracker::{
    identity::domain::{Actor, Role, User, UserId},
    project::services::{AssignUserRequest, CreateProjectRequest},
    task::services::CreateTaskRequest,
};
use chrono::{Days, Utc};
use eyre::WrapErr;
use rstest_bdd_macros::given;

#[given(r#"a project named "{name}""#)]
fn project_named(world: &mut ScoringWorld, name: String) -> Result<(), eyre::Report> {
    let project = run_async(
        world
            .project_service
            .create(&world.admin, CreateProjectRequest::new(name)),
    )
    .wrap_err("create project for scoring scenario")?;
    world.project = Some(project);
    Ok(())
}

#[given("a task worth {score:i64} points")]
fn task_worth(world: &mut ScoringWorld, score: i64) -> Result<(), eyre::Report> {
    let project_id = world.project()?.id();
    let name = format!("task {}", world.tasks.len() + 1);
    let task = run_async(world.task_service.create(
        &world.admin,
        CreateTaskRequest::new(project_id, name, "scenario work").with_score(score),
    ))
    .wrap_err("create task for scoring scenario")?;
    world.tasks.push(task);
    Ok(())
}

#[given(r#"a member named "{name}" assigned to the project"#)]
fn member_assigned(world: &mut ScoringWorld, name: String) -> Result<(), eyre::Report> {
    let project_id = world.project()?.id();
    let member_id = UserId::new();
    let email = format!("{name}@example.com");
    world
        .users
        .insert(User::new(member_id, name, email, Role::Member))
        .wrap_err("seed member")?;

    let today = Utc::now().date_naive();
    let end = today
        .checked_add_days(Days::new(7))
        .ok_or_else(|| eyre::eyre!("date out of range"))?;
    let request = AssignUserRequest::new(project_id, member_id)
        .with_start_date(today.format("%Y-%m-%d").to_string())
        .with_end_date(end.format("%Y-%m-%d").to_string());
    let project = run_async(world.project_service.assign_user(&world.admin, request))
        .wrap_err("assign member for scoring scenario")?;

    world.project = Some(project);
    world.member = Some(Actor::member(member_id));
    Ok(())
}
