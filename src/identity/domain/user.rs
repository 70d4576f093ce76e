//! User record as exposed by the account system.

use super::{Role, UserId};
use serde::{Deserialize, Serialize};

/// Read-only view of a registered user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    id: UserId,
    username: String,
    email: String,
    first_name: String,
    last_name: String,
    role: Role,
}

impl User {
    /// Creates a user record.
    #[must_use]
    pub fn new(
        id: UserId,
        username: impl Into<String>,
        email: impl Into<String>,
        role: Role,
    ) -> Self {
        Self {
            id,
            username: username.into(),
            email: email.into(),
            first_name: String::new(),
            last_name: String::new(),
            role,
        }
    }

    /// Sets the user's first and last name.
    #[must_use]
    pub fn with_name(mut self, first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        self.first_name = first_name.into();
        self.last_name = last_name.into();
        self
    }

    /// Returns the user identifier.
    #[must_use]
    pub const fn id(&self) -> UserId {
        self.id
    }

    /// Returns the login name.
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Returns the email address.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Returns the first name.
    #[must_use]
    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    /// Returns the last name.
    #[must_use]
    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    /// Returns the user's role.
    #[must_use]
    pub const fn role(&self) -> Role {
        self.role
    }

    /// Returns `"{first_name} {last_name}"`.
    #[must_use]
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}
