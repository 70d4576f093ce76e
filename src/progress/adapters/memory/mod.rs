//! In-memory progress repository.

mod progress;

pub use progress::InMemoryProgressRepository;
