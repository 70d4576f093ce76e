//! User identities and role-based authorization.
//!
//! Users are owned by an external account system; this crate only reads
//! them. The authenticated caller of every operation is modelled as an
//! [`domain::Actor`], whose [`domain::Actor::require_role`] check is the
//! single authorization capability used by the project and task services.
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]

pub mod adapters;
pub mod domain;
pub mod ports;

#[cfg(test)]
mod tests;
