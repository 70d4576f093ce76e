//! Progress status state machine.

use super::ParseProgressStatusError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Completion status of a progress record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgressStatus {
    /// Work has not started.
    #[default]
    Pending,
    /// Work is under way.
    InProgress,
    /// Work is finished; terminal.
    Completed,
}

impl ProgressStatus {
    /// Every recognised status.
    pub const ALL: [Self; 3] = [Self::Pending, Self::InProgress, Self::Completed];

    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
        }
    }

    /// Returns `true` when no further transition is accepted.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Completed)
    }

    /// Returns `true` when a record in this status may move to `target`.
    ///
    /// Only `Completed` is restricted: it accepts nothing. Every other
    /// status may move anywhere, including backwards or to itself.
    #[must_use]
    pub const fn can_transition_to(self, target: Self) -> bool {
        matches!((self, target), (Self::Pending | Self::InProgress, _))
    }
}

impl fmt::Display for ProgressStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for ProgressStatus {
    type Error = ParseProgressStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase().replace('-', "_");
        match normalized.as_str() {
            "pending" => Ok(Self::Pending),
            "in_progress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            _ => Err(ParseProgressStatusError(value.to_owned())),
        }
    }
}
