//! Domain model for users, roles and authenticated actors.

mod actor;
mod error;
mod ids;
mod role;
mod user;

pub use actor::Actor;
pub use error::{AuthorizationError, ParseRoleError};
pub use ids::UserId;
pub use role::Role;
pub use user::User;
