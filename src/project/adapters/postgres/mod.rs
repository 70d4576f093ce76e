//! `PostgreSQL` adapters for project documents.

mod models;
mod repository;
mod schema;

pub use repository::PostgresProjectRepository;
