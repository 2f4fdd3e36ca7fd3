//! Translation of pool and Diesel failures into [`NoteRepositoryError`].
//!
//! Driver messages are logged at debug level and replaced with generic text,
//! so nothing database-specific reaches the domain.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use crate::domain::ports::NoteRepositoryError;

use super::pool::PoolError;

pub(crate) fn map_pool_error(error: PoolError) -> NoteRepositoryError {
    let message = match error {
        PoolError::Checkout { message } | PoolError::Build { message } => message,
    };
    NoteRepositoryError::connection(message)
}

pub(crate) fn map_diesel_error(error: DieselError) -> NoteRepositoryError {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        other => debug!(error = %other, "diesel operation failed"),
    }

    match error {
        DieselError::NotFound => NoteRepositoryError::query("record not found"),
        DieselError::QueryBuilderError(_) => NoteRepositoryError::query("database query error"),
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _)
        | DieselError::BrokenTransactionManager => {
            NoteRepositoryError::connection("database connection error")
        }
        _ => NoteRepositoryError::query("database error"),
    }
}
