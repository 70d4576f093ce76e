//! JSON envelopes returned by the request facade.

use crate::error::ErrorKind;
use crate::project::services::ProjectServiceError;
use crate::task::services::TaskServiceError;
use serde::Serialize;
use serde_json::{Value, json};
use thiserror::Error;

/// Success envelope: `{statusCode, data, message}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    /// HTTP-like status code.
    pub status_code: u16,
    /// Operation payload.
    pub data: T,
    /// Human-readable summary.
    pub message: String,
}

/// A failed request, categorised for the error envelope.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {message}")]
pub struct ApiError {
    /// Failure category; decides the status code.
    pub kind: ErrorKind,
    /// Message placed in the envelope.
    pub message: String,
}

impl ApiError {
    /// Creates an error of the given category.
    #[must_use]
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Creates a validation error.
    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, message)
    }

    /// Wraps a service failure, hiding the details of internal errors.
    fn from_service(kind: ErrorKind, err: &dyn std::error::Error) -> Self {
        if kind == ErrorKind::Internal {
            tracing::error!(error = %err, "request failed");
            return Self::new(kind, "Internal server error");
        }
        Self::new(kind, err.to_string())
    }
}

impl From<ProjectServiceError> for ApiError {
    fn from(err: ProjectServiceError) -> Self {
        Self::from_service(err.kind(), &err)
    }
}

impl From<TaskServiceError> for ApiError {
    fn from(err: TaskServiceError) -> Self {
        Self::from_service(err.kind(), &err)
    }
}

/// Status code and JSON body of a handled request.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiReply {
    /// HTTP-like status code.
    pub status: u16,
    /// Serialized envelope.
    pub body: Value,
}

impl ApiReply {
    /// Builds a success reply wrapping `data`.
    ///
    /// A payload that fails to serialize becomes a 500 error reply.
    #[must_use]
    pub fn success<T: Serialize>(status: u16, data: T, message: impl Into<String>) -> Self {
        let envelope = ApiResponse {
            status_code: status,
            data,
            message: message.into(),
        };
        match serde_json::to_value(&envelope) {
            Ok(body) => Self { status, body },
            Err(err) => {
                tracing::error!(error = %err, "failed to serialize response payload");
                Self::failure(&ApiError::new(ErrorKind::Internal, "Internal server error"))
            }
        }
    }

    /// Builds an error reply.
    #[must_use]
    pub fn failure(error: &ApiError) -> Self {
        Self::status_only(error.kind.status_code(), error.message.clone())
    }

    /// Builds an error envelope `{statusCode, message}` with an explicit
    /// status code.
    #[must_use]
    pub fn status_only(status: u16, message: impl Into<String>) -> Self {
        Self {
            status,
            body: json!({ "statusCode": status, "message": message.into() }),
        }
    }
}
