//! Per-user score entries.

use crate::identity::domain::UserId;
use serde::{Deserialize, Serialize};

/// Points a user has earned on one project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserScore {
    /// User the points belong to.
    pub user_id: UserId,
    /// Sum of the scores of tasks the user completed.
    pub score: i64,
}

impl UserScore {
    /// Creates an entry with no points.
    #[must_use]
    pub const fn zero(user_id: UserId) -> Self {
        Self { user_id, score: 0 }
    }
}
