//! The authenticated caller of an operation.

use super::{AuthorizationError, Role, UserId};

/// Caller identity populated by the authentication layer before dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Actor {
    id: UserId,
    role: Role,
}

impl Actor {
    /// Creates an actor.
    #[must_use]
    pub const fn new(id: UserId, role: Role) -> Self {
        Self { id, role }
    }

    /// Creates an administrator actor.
    #[must_use]
    pub const fn admin(id: UserId) -> Self {
        Self::new(id, Role::Admin)
    }

    /// Creates a member actor.
    #[must_use]
    pub const fn member(id: UserId) -> Self {
        Self::new(id, Role::Member)
    }

    /// Returns the caller's user identifier.
    #[must_use]
    pub const fn id(&self) -> UserId {
        self.id
    }

    /// Returns the caller's role.
    #[must_use]
    pub const fn role(&self) -> Role {
        self.role
    }

    /// Returns `true` when the caller is an administrator.
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    /// Checks that the caller holds `required`.
    ///
    /// Administrators satisfy every requirement.
    ///
    /// # Errors
    ///
    /// Returns [`AuthorizationError`] when the caller's role is insufficient.
    pub const fn require_role(&self, required: Role) -> Result<(), AuthorizationError> {
        match (required, self.role) {
            (_, Role::Admin) | (Role::Member, Role::Member) => Ok(()),
            (Role::Admin, Role::Member) => Err(AuthorizationError {
                required,
                actual: self.role,
            }),
        }
    }
}
