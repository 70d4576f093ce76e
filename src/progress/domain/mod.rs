//! Domain model for progress records.

mod error;
mod ids;
mod record;
mod status;

pub use error::{ParseProgressStatusError, ProgressDomainError};
pub use ids::ProgressId;
pub use record::{PersistedProgressData, ProgressRecord};
pub use status::ProgressStatus;
