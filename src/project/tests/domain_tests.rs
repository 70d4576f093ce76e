//! Assignment windows and project score bookkeeping.

use crate::identity::domain::UserId;
use crate::project::domain::{AssignmentWindow, Project, ProjectDomainError};
use crate::task::domain::TaskId;
use chrono::{NaiveDate, TimeZone, Utc};
use mockable::DefaultClock;
use rstest::{fixture, rstest};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 10).expect("valid date")
}

#[fixture]
fn project() -> Project {
    Project::new("Apollo", None, &DefaultClock).expect("valid project")
}

fn window() -> AssignmentWindow {
    AssignmentWindow::parse(Some("2026-03-10"), Some("2026-04-01"), today()).expect("valid window")
}

#[rstest]
#[case("2026-03-10", "2026-03-11")]
#[case("2026-03-12T09:30:00Z", "2026-03-20T17:00:00+02:00")]
#[case("2026-03-12T09:30:00", "2026-03-12T10:30:00")]
fn window_accepts_today_or_later(#[case] start: &str, #[case] end: &str) {
    assert!(AssignmentWindow::parse(Some(start), Some(end), today()).is_ok());
}

#[test]
fn window_reads_plain_dates_as_midnight_utc() {
    let parsed = window();
    assert_eq!(
        parsed.start(),
        Utc.with_ymd_and_hms(2026, 3, 10, 0, 0, 0).single().expect("valid instant")
    );
}

#[rstest]
#[case(Some("2026-03-12"), Some("2026-03-12"), ProjectDomainError::StartNotBeforeEnd)]
#[case(Some("2026-03-20"), Some("2026-03-12"), ProjectDomainError::StartNotBeforeEnd)]
#[case(Some("2026-03-09"), Some("2026-03-12"), ProjectDomainError::StartBeforeToday)]
#[case(None, Some("2026-03-12"), ProjectDomainError::MissingAssignmentDates)]
#[case(Some("2026-03-12"), Some("  "), ProjectDomainError::MissingAssignmentDates)]
fn window_rejects_invalid_ranges(
    #[case] start: Option<&str>,
    #[case] end: Option<&str>,
    #[case] expected: ProjectDomainError,
) {
    assert_eq!(AssignmentWindow::parse(start, end, today()), Err(expected));
}

#[test]
fn window_names_the_malformed_field() {
    let result = AssignmentWindow::parse(Some("2026-03-12"), Some("next week"), today());
    assert_eq!(
        result,
        Err(ProjectDomainError::InvalidDate {
            field: "end",
            value: "next week".to_owned(),
        })
    );
}

#[rstest]
#[case("")]
#[case("   ")]
fn project_requires_a_name(#[case] name: &str) {
    assert_eq!(
        Project::new(name, None, &DefaultClock),
        Err(ProjectDomainError::EmptyProjectName)
    );
}

#[rstest]
fn new_project_starts_empty(project: Project) {
    assert_eq!(project.total_score(), 0);
    assert!(project.assigned_to().is_empty());
    assert!(project.task_ids().is_empty());
    assert!(project.score_by_user().is_empty());
}

#[rstest]
fn assign_tracks_score_at_zero(mut project: Project) {
    let user_id = UserId::new();
    project.assign(user_id, window(), &DefaultClock).expect("first assignment");

    assert!(project.is_assigned(user_id));
    assert_eq!(project.score_of(user_id), Some(0));
}

#[rstest]
fn duplicate_assignment_leaves_project_unchanged(mut project: Project) {
    let user_id = UserId::new();
    project.assign(user_id, window(), &DefaultClock).expect("first assignment");
    let snapshot = project.clone();

    let result = project.assign(user_id, window(), &DefaultClock);

    assert_eq!(result, Err(ProjectDomainError::AlreadyAssigned(user_id)));
    assert!(result.err().is_some_and(|err| err.is_conflict()));
    assert_eq!(project, snapshot);
}

#[rstest]
fn unassign_keeps_score_history(mut project: Project) {
    let user_id = UserId::new();
    project.assign(user_id, window(), &DefaultClock).expect("assignment");
    project.credit(user_id, 15, &DefaultClock).expect("score change");

    assert!(project.unassign(user_id, &DefaultClock));
    assert!(!project.is_assigned(user_id));
    assert_eq!(project.score_of(user_id), Some(15));
}

#[rstest]
fn unassign_unknown_user_is_a_no_op(mut project: Project) {
    let snapshot = project.clone();
    assert!(!project.unassign(UserId::new(), &DefaultClock));
    assert_eq!(project, snapshot);
}

#[rstest]
fn reassignment_reuses_existing_score_entry(mut project: Project) {
    let user_id = UserId::new();
    project.assign(user_id, window(), &DefaultClock).expect("assignment");
    project.credit(user_id, 20, &DefaultClock).expect("score change");
    assert!(project.unassign(user_id, &DefaultClock));

    project.assign(user_id, window(), &DefaultClock).expect("reassignment");

    assert_eq!(project.score_by_user().len(), 1);
    assert_eq!(project.score_of(user_id), Some(20));
}

#[rstest]
fn total_score_follows_attached_tasks(mut project: Project) {
    let first = TaskId::new();
    let second = TaskId::new();
    project.attach_task(first, 10, &DefaultClock).expect("score change");
    project.attach_task(second, 25, &DefaultClock).expect("score change");
    assert_eq!(project.total_score(), 35);

    project.detach_task(first, 10, &DefaultClock).expect("score change");
    assert_eq!(project.total_score(), 25);
    assert_eq!(project.task_ids(), [second].as_slice());
}

#[rstest]
fn credit_creates_missing_entry(mut project: Project) {
    let user_id = UserId::new();
    project.credit(user_id, 7, &DefaultClock).expect("score change");
    project.credit(user_id, 3, &DefaultClock).expect("score change");
    assert_eq!(project.score_of(user_id), Some(10));
}

#[rstest]
fn total_overflow_is_rejected_without_changes(mut project: Project) {
    project.attach_task(TaskId::new(), i64::MAX, &DefaultClock).expect("first task fits");
    let snapshot = project.clone();

    let result = project.attach_task(TaskId::new(), 1, &DefaultClock);

    assert_eq!(
        result,
        Err(ProjectDomainError::ScoreOverflow {
            total: i64::MAX,
            op: '+',
            points: 1,
        })
    );
    assert_eq!(project, snapshot);
}

#[rstest]
fn total_underflow_is_rejected_without_changes(mut project: Project) {
    let task_id = TaskId::new();
    project.attach_task(task_id, i64::MIN + 1, &DefaultClock).expect("first task fits");
    let snapshot = project.clone();

    let result = project.detach_task(task_id, 2, &DefaultClock);

    assert!(matches!(result, Err(ProjectDomainError::ScoreOverflow { op: '-', .. })));
    assert_eq!(project, snapshot);
}

#[rstest]
fn credit_overflow_keeps_user_score(mut project: Project) {
    let user_id = UserId::new();
    project.credit(user_id, i64::MAX, &DefaultClock).expect("first credit fits");

    let result = project.credit(user_id, 1, &DefaultClock);

    assert!(matches!(result, Err(ProjectDomainError::ScoreOverflow { .. })));
    assert_eq!(project.score_of(user_id), Some(i64::MAX));
}

#[rstest]
fn update_ignores_blank_values(mut project: Project) {
    project.apply_update(Some("  ".to_owned()), Some("Moon landing".to_owned()), &DefaultClock);
    assert_eq!(project.name(), "Apollo");
    assert_eq!(project.description(), Some("Moon landing"));
}
