//! Assignment of a user to a project for a date window.

use super::ProjectDomainError;
use crate::identity::domain::UserId;
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

/// Validated `[start, end)` window of an assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentWindow {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl AssignmentWindow {
    /// Parses and validates raw start and end dates against `today`.
    ///
    /// Accepts `YYYY-MM-DD` (midnight UTC), RFC 3339 timestamps, and
    /// `YYYY-MM-DDTHH:MM:SS` read as UTC. The past-date checks compare
    /// calendar days only.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectDomainError`] when a date is missing or malformed,
    /// when `start >= end`, or when either date falls before `today`.
    pub fn parse(
        start: Option<&str>,
        end: Option<&str>,
        today: NaiveDate,
    ) -> Result<Self, ProjectDomainError> {
        let (Some(raw_start), Some(raw_end)) = (non_blank(start), non_blank(end)) else {
            return Err(ProjectDomainError::MissingAssignmentDates);
        };
        let parsed_start = parse_date("start", raw_start)?;
        let parsed_end = parse_date("end", raw_end)?;
        Self::new(parsed_start, parsed_end, today)
    }

    /// Validates an already-parsed window against `today`.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectDomainError`] when `start >= end` or either date
    /// falls on a day before `today`.
    pub fn new(
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        today: NaiveDate,
    ) -> Result<Self, ProjectDomainError> {
        if start >= end {
            return Err(ProjectDomainError::StartNotBeforeEnd);
        }
        if start.date_naive() < today {
            return Err(ProjectDomainError::StartBeforeToday);
        }
        if end.date_naive() < today {
            return Err(ProjectDomainError::EndBeforeToday);
        }
        Ok(Self { start, end })
    }

    /// Returns the start of the window.
    #[must_use]
    pub const fn start(&self) -> DateTime<Utc> {
        self.start
    }

    /// Returns the end of the window.
    #[must_use]
    pub const fn end(&self) -> DateTime<Utc> {
        self.end
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|trimmed| !trimmed.is_empty())
}

fn parse_date(field: &'static str, raw: &str) -> Result<DateTime<Utc>, ProjectDomainError> {
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
        return Ok(timestamp.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(naive.and_utc());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map(|date| date.and_time(NaiveTime::MIN).and_utc())
        .map_err(|_| ProjectDomainError::InvalidDate {
            field,
            value: raw.to_owned(),
        })
}

/// One user's assignment to a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    /// Assigned user.
    pub user_id: UserId,
    /// Start of the assignment.
    pub start_date: DateTime<Utc>,
    /// End of the assignment.
    pub end_date: DateTime<Utc>,
}

impl Assignment {
    /// Creates an assignment for `user_id` over `window`.
    #[must_use]
    pub const fn new(user_id: UserId, window: AssignmentWindow) -> Self {
        Self {
            user_id,
            start_date: window.start,
            end_date: window.end,
        }
    }
}
