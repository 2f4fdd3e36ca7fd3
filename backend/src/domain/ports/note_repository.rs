//! Driven port for note persistence.
//!
//! Every operation is scoped by [`OwnerId`]. Updates and deletes match on id
//! and owner together, so a note owned by someone else looks exactly like a
//! note that does not exist.

use async_trait::async_trait;

use crate::domain::{Note, NoteDraft, NoteId, OwnerId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by note repository adapters.
    pub enum NoteRepositoryError {
        /// A connection could not be obtained from the store.
        Connection { message: String } =>
            "note repository connection failed: {message}",
        /// A query or mutation failed during execution.
        Query { message: String } =>
            "note repository query failed: {message}",
    }
}

/// Storage contract for notes.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NoteRepository: Send + Sync {
    /// All notes for `owner`, newest first by creation time with ties broken
    /// by descending id.
    async fn list_for_owner(&self, owner: &OwnerId) -> Result<Vec<Note>, NoteRepositoryError>;

    /// Insert a note stamped with `owner`; the store assigns id and timestamps.
    async fn create(&self, owner: &OwnerId, draft: &NoteDraft)
    -> Result<Note, NoteRepositoryError>;

    /// Replace title and content of the note matching both `id` and `owner`.
    ///
    /// Returns `None` when no row matched.
    async fn update_owned(
        &self,
        id: NoteId,
        owner: &OwnerId,
        draft: &NoteDraft,
    ) -> Result<Option<Note>, NoteRepositoryError>;

    /// Remove the note matching both `id` and `owner`.
    ///
    /// Returns `false` when no row matched.
    async fn delete_owned(&self, id: NoteId, owner: &OwnerId)
    -> Result<bool, NoteRepositoryError>;
}
