//! Per-user, per-task completion tracking.
//!
//! A progress record joins one user to one task of a project. Records are
//! created by fan-out when users are assigned or tasks are created, change
//! status as the user works, and disappear with their task. Completing a
//! record is terminal and is the only way a user earns points.
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - The shared fan-out rules in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
