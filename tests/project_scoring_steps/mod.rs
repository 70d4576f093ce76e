//! Step definitions for project scoring scenarios.

pub mod given;
pub mod then;
pub mod when;
pub mod world;
