//! Route table of the request facade.

use crate::project::domain::ProjectId;
use crate::task::domain::TaskId;
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

/// Request method understood by the facade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    /// `GET`
    Get,
    /// `POST`
    Post,
    /// `PATCH`
    Patch,
    /// `DELETE`
    Delete,
}

impl Method {
    /// Returns the canonical upper-case name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for Method {
    type Error = RouteError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_uppercase().as_str() {
            "GET" => Ok(Self::Get),
            "POST" => Ok(Self::Post),
            "PATCH" => Ok(Self::Patch),
            "DELETE" => Ok(Self::Delete),
            _ => Err(RouteError::UnsupportedMethod(value.to_owned())),
        }
    }
}

/// Resource addressed by a request path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// `/projects`
    Projects,
    /// `/projects/:projectId`
    Project(ProjectId),
    /// `/projects/assign/:projectId`
    Assignment(ProjectId),
    /// `/tasks/:projectId`
    ProjectTasks(ProjectId),
    /// `/tasks/t/:taskId`
    Task(TaskId),
}

/// Failures while resolving a request path.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    /// No route matches the path.
    #[error("route not found: {0}")]
    NotFound(String),
    /// A path identifier is not a UUID.
    #[error("invalid identifier: {0}")]
    MalformedId(String),
    /// The method is not one the facade serves.
    #[error("unsupported method: {0}")]
    UnsupportedMethod(String),
}

impl Route {
    /// Resolves `path` to a route. Trailing slashes and a query string are
    /// ignored.
    ///
    /// # Errors
    ///
    /// Returns [`RouteError::NotFound`] for unknown paths and
    /// [`RouteError::MalformedId`] when an identifier segment is not a UUID.
    pub fn resolve(path: &str) -> Result<Self, RouteError> {
        let without_query = path.split_once('?').map_or(path, |(head, _)| head);
        let segments: Vec<&str> = without_query
            .split('/')
            .filter(|segment| !segment.is_empty())
            .collect();
        match segments.as_slice() {
            ["projects"] => Ok(Self::Projects),
            ["projects", "assign", id] => parse_id(id).map(|uuid| Self::Assignment(ProjectId::from_uuid(uuid))),
            ["projects", id] => parse_id(id).map(|uuid| Self::Project(ProjectId::from_uuid(uuid))),
            ["tasks", "t", id] => parse_id(id).map(|uuid| Self::Task(TaskId::from_uuid(uuid))),
            ["tasks", id] => parse_id(id).map(|uuid| Self::ProjectTasks(ProjectId::from_uuid(uuid))),
            _ => Err(RouteError::NotFound(path.to_owned())),
        }
    }
}

fn parse_id(segment: &str) -> Result<Uuid, RouteError> {
    Uuid::parse_str(segment).map_err(|_| RouteError::MalformedId(segment.to_owned()))
}
