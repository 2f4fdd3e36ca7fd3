//! PostgreSQL persistence adapters built on Diesel and `diesel-async`.

mod diesel_error_mapping;
mod diesel_note_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_note_repository::DieselNoteRepository;
pub use migrations::{MIGRATIONS, MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
