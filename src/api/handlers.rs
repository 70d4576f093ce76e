//! Request dispatch onto the project and task services.

use super::envelope::{ApiError, ApiReply};
use super::routes::{Method, Route, RouteError};
use crate::config::TrackerConfig;
use crate::error::ErrorKind;
use crate::identity::{domain::Actor, domain::UserId, ports::UserDirectory};
use crate::progress::ports::ProgressRepository;
use crate::project::{
    domain::ProjectId,
    ports::ProjectRepository,
    services::{
        AssignUserRequest, CreateProjectRequest, ProjectService, ProjectView, RemoveUserOutcome,
        UpdateProjectRequest,
    },
};
use crate::task::{
    domain::TaskId,
    ports::TaskRepository,
    services::{CreateTaskRequest, TaskService, UpdateTaskRequest},
};
use mockable::Clock;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use uuid::Uuid;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProjectBody {
    name: Option<String>,
    description: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AssignBody {
    #[serde(rename = "userid")]
    user_id: Option<String>,
    start_date: Option<String>,
    end_date: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RemoveBody {
    user_id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TaskBody {
    name: Option<String>,
    description: Option<String>,
    score: Option<i64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProgressBody {
    status: Option<String>,
}

type HandlerResult = Result<ApiReply, ApiError>;

/// Framework-agnostic request facade.
///
/// The embedding transport authenticates the caller, then hands the actor,
/// method, path and optional JSON body to [`TrackerApi::handle`].
#[derive(Clone)]
pub struct TrackerApi<P, T, G, U, C>
where
    P: ProjectRepository,
    T: TaskRepository,
    G: ProgressRepository,
    U: UserDirectory,
    C: Clock + Send + Sync,
{
    projects: ProjectService<P, T, G, U, C>,
    tasks: TaskService<P, T, G, U, C>,
}

impl<P, T, G, U, C> TrackerApi<P, T, G, U, C>
where
    P: ProjectRepository,
    T: TaskRepository,
    G: ProgressRepository,
    U: UserDirectory,
    C: Clock + Send + Sync,
{
    /// Wires both services over the same stores.
    #[must_use]
    pub fn new(
        projects: Arc<P>,
        tasks: Arc<T>,
        progress: Arc<G>,
        users: Arc<U>,
        clock: Arc<C>,
        config: TrackerConfig,
    ) -> Self {
        Self {
            projects: ProjectService::new(
                Arc::clone(&projects),
                Arc::clone(&tasks),
                Arc::clone(&progress),
                Arc::clone(&users),
                Arc::clone(&clock),
            ),
            tasks: TaskService::new(projects, tasks, progress, users, clock).with_config(config),
        }
    }

    /// Handles one request on behalf of `actor`.
    ///
    /// Never fails: every outcome, including routing errors, is expressed as
    /// an [`ApiReply`].
    pub async fn handle(
        &self,
        actor: &Actor,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> ApiReply {
        let route = match Route::resolve(path) {
            Ok(route) => route,
            Err(RouteError::MalformedId(segment)) => {
                return ApiReply::status_only(400, format!("Invalid id: {segment}"));
            }
            Err(err) => return ApiReply::status_only(404, err.to_string()),
        };
        tracing::debug!(%method, path, actor = %actor.id(), "dispatching request");
        match self.dispatch(actor, method, route, body).await {
            Ok(reply) => reply,
            Err(err) => ApiReply::failure(&err),
        }
    }

    async fn dispatch(
        &self,
        actor: &Actor,
        method: Method,
        route: Route,
        body: Option<&Value>,
    ) -> HandlerResult {
        match (route, method) {
            (Route::Projects, Method::Get) => self.list_projects(actor).await,
            (Route::Projects, Method::Post) => self.create_project(actor, parse_body(body)?).await,
            (Route::Project(id), Method::Get) => {
                let view = self.projects.get(actor, id).await?;
                Ok(ApiReply::success(200, view, "Project fetched successfully"))
            }
            (Route::Project(id), Method::Patch) => {
                self.update_project(actor, id, parse_body(body)?).await
            }
            (Route::Project(id), Method::Delete) => {
                self.projects.delete(actor, id).await?;
                Ok(ApiReply::success(200, Value::Null, "Project deleted successfully"))
            }
            (Route::Assignment(id), Method::Post) => {
                self.assign_user(actor, id, parse_body(body)?).await
            }
            (Route::Assignment(id), Method::Delete) => self.remove_user(id, parse_body(body)?).await,
            (Route::ProjectTasks(id), Method::Post) => {
                self.create_task(actor, id, parse_body(body)?).await
            }
            (Route::Task(id), Method::Get) => {
                let view = self.tasks.get(actor, id).await?;
                Ok(ApiReply::success(200, view, "Task fetched successfully"))
            }
            (Route::Task(id), Method::Patch) => self.update_task(actor, id, parse_body(body)?).await,
            (Route::Task(id), Method::Delete) => {
                self.tasks.delete(actor, id).await?;
                Ok(ApiReply::success(200, Value::Null, "Task deleted successfully"))
            }
            (Route::Task(id), Method::Post) => {
                self.update_progress(actor, id, parse_body(body)?).await
            }
            (_, unsupported) => Ok(ApiReply::status_only(
                405,
                format!("Method {unsupported} not allowed"),
            )),
        }
    }

    async fn list_projects(&self, actor: &Actor) -> HandlerResult {
        let summaries = self.projects.list(actor).await?;
        if summaries.is_empty() {
            return Ok(ApiReply::success(404, summaries, "No projects found"));
        }
        Ok(ApiReply::success(200, summaries, "Projects fetched successfully"))
    }

    async fn create_project(&self, actor: &Actor, body: ProjectBody) -> HandlerResult {
        let mut request = CreateProjectRequest::new(body.name.unwrap_or_default());
        if let Some(description) = body.description {
            request = request.with_description(description);
        }
        let project = self.projects.create(actor, request).await?;
        Ok(ApiReply::success(
            200,
            ProjectView::from_project(&project),
            "Project created successfully",
        ))
    }

    async fn update_project(&self, actor: &Actor, id: ProjectId, body: ProjectBody) -> HandlerResult {
        let mut request = UpdateProjectRequest::new(id);
        if let Some(name) = body.name {
            request = request.with_name(name);
        }
        if let Some(description) = body.description {
            request = request.with_description(description);
        }
        let project = self.projects.update(actor, request).await?;
        Ok(ApiReply::success(
            200,
            ProjectView::from_project(&project),
            "Project updated successfully",
        ))
    }

    async fn assign_user(&self, actor: &Actor, id: ProjectId, body: AssignBody) -> HandlerResult {
        let user_id = parse_user_id(body.user_id, "userid")?;
        let mut request = AssignUserRequest::new(id, user_id);
        if let Some(start) = body.start_date {
            request = request.with_start_date(start);
        }
        if let Some(end) = body.end_date {
            request = request.with_end_date(end);
        }
        let project = self.projects.assign_user(actor, request).await?;
        Ok(ApiReply::success(
            200,
            ProjectView::from_project(&project),
            "User assigned successfully",
        ))
    }

    async fn remove_user(&self, id: ProjectId, body: RemoveBody) -> HandlerResult {
        let user_id = parse_user_id(body.user_id, "userId")?;
        match self.projects.remove_user(id, user_id).await? {
            RemoveUserOutcome::Removed(project) => Ok(ApiReply::success(
                200,
                ProjectView::from_project(&project),
                "User removed successfully",
            )),
            RemoveUserOutcome::NotAssigned => Ok(ApiReply::status_only(
                404,
                "User not assigned to this project",
            )),
        }
    }

    async fn create_task(&self, actor: &Actor, id: ProjectId, body: TaskBody) -> HandlerResult {
        let mut request = CreateTaskRequest::new(
            id,
            body.name.unwrap_or_default(),
            body.description.unwrap_or_default(),
        );
        if let Some(score) = body.score {
            request = request.with_score(score);
        }
        let task = self.tasks.create(actor, request).await?;
        Ok(ApiReply::success(201, task, "Task created successfully"))
    }

    async fn update_task(&self, actor: &Actor, id: TaskId, body: TaskBody) -> HandlerResult {
        let mut request = UpdateTaskRequest::new(id);
        if let Some(name) = body.name {
            request = request.with_name(name);
        }
        if let Some(description) = body.description {
            request = request.with_description(description);
        }
        let task = self.tasks.update(actor, request).await?;
        Ok(ApiReply::success(200, task, "Task updated successfully"))
    }

    async fn update_progress(&self, actor: &Actor, id: TaskId, body: ProgressBody) -> HandlerResult {
        let status = body
            .status
            .ok_or_else(|| ApiError::validation("status is required"))?;
        let record = self.tasks.update_progress(actor, id, &status).await?;
        Ok(ApiReply::success(200, record, "Progress updated successfully"))
    }
}

fn parse_body<B: DeserializeOwned + Default>(body: Option<&Value>) -> Result<B, ApiError> {
    match body {
        None | Some(Value::Null) => Ok(B::default()),
        Some(value) => B::deserialize(value)
            .map_err(|err| ApiError::validation(format!("Invalid request body: {err}"))),
    }
}

fn parse_user_id(raw: Option<String>, field: &str) -> Result<UserId, ApiError> {
    let value = raw.ok_or_else(|| ApiError::validation(format!("{field} is required")))?;
    Uuid::parse_str(value.trim())
        .map(UserId::from_uuid)
        .map_err(|_| ApiError::new(ErrorKind::Validation, format!("Invalid {field}: {value}")))
}
