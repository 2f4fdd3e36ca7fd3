//! Outbound adapters implementing the domain's driven ports.
//!
//! - `persistence`: PostgreSQL via Diesel, used in production.
//! - `memory`: process-local store, used without a database and in tests.

pub mod memory;
pub mod persistence;
