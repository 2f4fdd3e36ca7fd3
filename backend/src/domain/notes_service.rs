//! Notes domain service.
//!
//! Implements [`NotesQuery`] and [`NotesCommand`] over any
//! [`NoteRepository`]. Repository failures are logged here and collapsed to
//! [`Error::internal`]; the HTTP adapter redacts the message before it leaves
//! the process.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, error};

use crate::domain::ports::{NoteRepository, NoteRepositoryError, NotesCommand, NotesQuery};
use crate::domain::{Error, Note, NoteDraft, NoteId, OwnerId};

/// Message used for both absent and foreign notes.
pub const NOTE_NOT_FOUND_MESSAGE: &str = "note not found";

/// Notes service implementing the driving ports.
pub struct NotesService<R: ?Sized> {
    repo: Arc<R>,
}

impl<R: ?Sized> Clone for NotesService<R> {
    fn clone(&self) -> Self {
        Self {
            repo: Arc::clone(&self.repo),
        }
    }
}

impl<R: ?Sized> NotesService<R> {
    /// Create a service over the given repository.
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }
}

impl<R> NotesService<R>
where
    R: NoteRepository + ?Sized,
{
    fn map_repository_error(operation: &'static str, err: NoteRepositoryError) -> Error {
        error!(error = %err, operation, "note repository failure");
        match err {
            NoteRepositoryError::Connection { message } => {
                Error::internal(format!("note store unavailable: {message}"))
            }
            NoteRepositoryError::Query { message } => {
                Error::internal(format!("note store error: {message}"))
            }
        }
    }

    fn not_found(id: NoteId) -> Error {
        debug!(note_id = %id, "note absent or owned by another identity");
        Error::not_found(NOTE_NOT_FOUND_MESSAGE)
    }
}

#[async_trait]
impl<R> NotesQuery for NotesService<R>
where
    R: NoteRepository + ?Sized,
{
    async fn list_notes(&self, owner: Option<OwnerId>) -> Result<Vec<Note>, Error> {
        let Some(owner) = owner else {
            return Ok(Vec::new());
        };
        self.repo
            .list_for_owner(&owner)
            .await
            .map_err(|err| Self::map_repository_error("list", err))
    }
}

#[async_trait]
impl<R> NotesCommand for NotesService<R>
where
    R: NoteRepository + ?Sized,
{
    async fn create_note(&self, owner: &OwnerId, draft: NoteDraft) -> Result<Note, Error> {
        self.repo
            .create(owner, &draft)
            .await
            .map_err(|err| Self::map_repository_error("create", err))
    }

    async fn update_note(
        &self,
        owner: &OwnerId,
        id: NoteId,
        draft: NoteDraft,
    ) -> Result<Note, Error> {
        self.repo
            .update_owned(id, owner, &draft)
            .await
            .map_err(|err| Self::map_repository_error("update", err))?
            .ok_or_else(|| Self::not_found(id))
    }

    async fn delete_note(&self, owner: &OwnerId, id: NoteId) -> Result<(), Error> {
        let removed = self
            .repo
            .delete_owned(id, owner)
            .await
            .map_err(|err| Self::map_repository_error("delete", err))?;
        if removed {
            Ok(())
        } else {
            Err(Self::not_found(id))
        }
    }
}

#[cfg(test)]
#[path = "notes_service_tests.rs"]
mod tests;
