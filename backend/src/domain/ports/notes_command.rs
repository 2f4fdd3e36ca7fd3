//! Driving port for note mutations.
//!
//! HTTP handlers call [`NotesCommand`] after the request has been validated
//! into an [`OwnerId`] and a [`NoteDraft`]. Not-found and not-owned both
//! surface as [`ErrorCode::NotFound`](crate::domain::ErrorCode::NotFound).

use async_trait::async_trait;

use crate::domain::{Error, Note, NoteDraft, NoteId, OwnerId};

/// Write-side use cases consumed by inbound adapters.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NotesCommand: Send + Sync {
    /// Create a note owned by `owner`.
    async fn create_note(&self, owner: &OwnerId, draft: NoteDraft) -> Result<Note, Error>;

    /// Update title and content of an owned note.
    async fn update_note(
        &self,
        owner: &OwnerId,
        id: NoteId,
        draft: NoteDraft,
    ) -> Result<Note, Error>;

    /// Delete an owned note.
    async fn delete_note(&self, owner: &OwnerId, id: NoteId) -> Result<(), Error>;
}
