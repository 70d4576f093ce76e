//! Transport-neutral request facade.
//!
//! Maps `(actor, method, path, body)` onto the project and task services and
//! wraps every outcome in a JSON envelope with an HTTP-like status code.
//! Authentication and the actual HTTP server belong to the embedding binary.

mod envelope;
mod handlers;
mod routes;

pub use envelope::{ApiError, ApiReply, ApiResponse};
pub use handlers::TrackerApi;
pub use routes::{Method, Route, RouteError};

#[cfg(test)]
mod tests;
