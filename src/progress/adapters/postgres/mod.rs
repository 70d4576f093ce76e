//! `PostgreSQL` adapters for progress records.

mod models;
mod repository;
mod schema;

pub use repository::PostgresProgressRepository;
