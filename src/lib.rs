//! Assignment tracker: projects, tasks and per-user progress scoring.
//!
//! Administrators create projects, assign users to them for a date window
//! and add point-valued tasks. Every assigned user gets one progress record
//! per task; completing a record credits the task's points to that user on
//! the project.
//!
//! # Architecture
//!
//! The crate follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for persistence and user lookup
//! - **Adapters**: In-memory and `PostgreSQL` implementations of the ports
//! - **Services**: Orchestration across aggregates and read projections
//!
//! # Modules
//!
//! - [`identity`]: Users, roles and the authenticated actor
//! - [`project`]: Project lifecycle, assignment and score bookkeeping
//! - [`task`]: Task lifecycle and progress updates
//! - [`progress`]: Per-user, per-task completion records
//! - [`api`]: Route table and JSON envelopes for an HTTP front end
//! - [`config`]: Service and store configuration
//! - [`error`]: Shared failure categories

pub mod api;
pub mod config;
pub mod error;
pub mod identity;
pub mod progress;
pub mod project;
pub mod task;

#[cfg(test)]
mod test_support;
