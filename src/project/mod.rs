//! Project lifecycle, assignment and score bookkeeping.
//!
//! Administrators create projects, assign users to them for a date window
//! and remove them again. Each project keeps the running total of its task
//! scores and the points every user has earned on it. Assigning a user fans
//! out one pending progress record per existing task. The module follows
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
