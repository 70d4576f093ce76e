//! Task lifecycle within a project.
//!
//! Tasks carry the point value that feeds a project's running total and,
//! once a user completes their progress record for the task, that user's
//! score on the project. Creating a task fans out one pending progress
//! record per user already assigned to the project; deleting it removes
//! those records and rolls the project total back. The module follows
//! hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services and read projections in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
