//! Port contracts for progress record persistence.

pub mod repository;

pub use repository::{ProgressRepository, ProgressRepositoryError, ProgressRepositoryResult};
