//! Domain model for projects.
//!
//! A project owns its assignment list and its per-user score ledger; task
//! documents only reference it by identifier.

mod assignment;
mod error;
mod ids;
mod project;
mod score;

pub use assignment::{Assignment, AssignmentWindow};
pub use error::ProjectDomainError;
pub use ids::ProjectId;
pub use project::{PersistedProjectData, Project};
pub use score::UserScore;
