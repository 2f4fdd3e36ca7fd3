//! Client-side notes state kept in step with the service.
//!
//! [`NotesBoard`] holds the note list, an edit form, the selected note, a
//! loading flag, and the anonymous identity. Every mutation is an explicit
//! round-trip: local state changes only after the service confirms.
//!
//! Read failures degrade to an empty list and are logged at warn level.
//! Write failures are logged and returned without touching local state.

use tracing::{debug, warn};

use crate::api::{Note, NoteInput, NotesApi};
use crate::error::ClientError;
use crate::identity::{IdentityStore, mint_identity};

/// Title and content being edited.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteForm {
    /// Title field.
    pub title: String,
    /// Content field.
    pub content: String,
}

/// Notes state machine over an API and an identity store.
#[derive(Debug)]
pub struct NotesBoard<A, S> {
    api: A,
    identity_store: S,
    identity: Option<String>,
    notes: Vec<Note>,
    form: NoteForm,
    selected: Option<i64>,
    loading: bool,
}

impl<A, S> NotesBoard<A, S>
where
    A: NotesApi,
    S: IdentityStore,
{
    /// Create an empty, unmounted board.
    pub fn new(api: A, identity_store: S) -> Self {
        Self {
            api,
            identity_store,
            identity: None,
            notes: Vec::new(),
            form: NoteForm::default(),
            selected: None,
            loading: false,
        }
    }

    /// Obtain or mint the identity, then load its notes.
    ///
    /// # Errors
    /// Returns [`ClientError::Identity`] when the identity cannot be read or
    /// persisted. Listing failures are not errors.
    pub async fn mount(&mut self) -> Result<(), ClientError> {
        let identity = self.ensure_identity()?;
        self.reload(&identity).await;
        Ok(())
    }

    /// Copy note `id` into the form and mark it selected.
    ///
    /// Returns `false` when the note is not on the board.
    pub fn select(&mut self, id: i64) -> bool {
        let Some(note) = self.notes.iter().find(|note| note.id == id) else {
            return false;
        };
        self.form = NoteForm {
            title: note.title.clone(),
            content: note.content.clone(),
        };
        self.selected = Some(id);
        true
    }

    /// Drop the selection and empty the form.
    pub fn clear_form(&mut self) {
        self.selected = None;
        self.form = NoteForm::default();
    }

    /// Replace the form title.
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.form.title = title.into();
    }

    /// Replace the form content.
    pub fn set_content(&mut self, content: impl Into<String>) {
        self.form.content = content.into();
    }

    /// Update the selected note, or create a new one when nothing is selected.
    ///
    /// On success the returned note replaces the selected entry in place (or
    /// is prepended) and the form is cleared.
    ///
    /// # Errors
    /// Returns the service or identity error; local state is left unchanged.
    pub async fn submit(&mut self) -> Result<Note, ClientError> {
        let identity = self.ensure_identity()?;
        let input = NoteInput {
            title: self.form.title.clone(),
            content: self.form.content.clone(),
        };

        let saved = match self.selected {
            Some(id) => {
                let updated = self
                    .api
                    .update(&identity, id, &input)
                    .await
                    .inspect_err(|error| warn!(%error, note_id = id, "failed to update note"))?;
                if let Some(slot) = self.notes.iter_mut().find(|note| note.id == updated.id) {
                    *slot = updated.clone();
                }
                updated
            }
            None => {
                let created = self
                    .api
                    .create(&identity, &input)
                    .await
                    .inspect_err(|error| warn!(%error, "failed to create note"))?;
                self.notes.insert(0, created.clone());
                created
            }
        };
        self.clear_form();
        Ok(saved)
    }

    /// Delete note `id` on the service, then drop it locally.
    ///
    /// # Errors
    /// Returns the service error, carrying status and body, and leaves the
    /// board untouched.
    pub async fn delete(&mut self, id: i64) -> Result<(), ClientError> {
        let identity = self.ensure_identity()?;
        self.api
            .delete(&identity, id)
            .await
            .inspect_err(|error| warn!(%error, note_id = id, "failed to delete note"))?;
        self.notes.retain(|note| note.id != id);
        if self.selected == Some(id) {
            self.clear_form();
        }
        Ok(())
    }

    /// Discard the identity, mint a new one, and reload.
    ///
    /// Notes created under the old identity stay on the service but are no
    /// longer reachable, so the reload yields an empty list.
    ///
    /// # Errors
    /// Returns [`ClientError::Identity`] when the store cannot be updated.
    pub async fn reset_identity(&mut self) -> Result<(), ClientError> {
        self.identity_store.clear()?;
        self.identity = None;
        self.notes.clear();
        self.clear_form();
        let identity = self.ensure_identity()?;
        debug!("anonymous identity reset");
        self.reload(&identity).await;
        Ok(())
    }

    /// Notes currently shown, newest first.
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    /// Current form contents.
    pub const fn form(&self) -> &NoteForm {
        &self.form
    }

    /// Selected note id, if any.
    pub const fn selected(&self) -> Option<i64> {
        self.selected
    }

    /// Whether a list request is in flight.
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    /// Identity in use once mounted.
    pub fn identity(&self) -> Option<&str> {
        self.identity.as_deref()
    }

    fn ensure_identity(&mut self) -> Result<String, ClientError> {
        if let Some(identity) = &self.identity {
            return Ok(identity.clone());
        }
        let identity = match self.identity_store.load()? {
            Some(identity) => identity,
            None => {
                let minted = mint_identity();
                self.identity_store.save(&minted)?;
                minted
            }
        };
        self.identity = Some(identity.clone());
        Ok(identity)
    }

    async fn reload(&mut self, identity: &str) {
        self.loading = true;
        self.notes = match self.api.list(identity).await {
            Ok(notes) => notes,
            Err(error) => {
                warn!(%error, "failed to load notes; showing an empty list");
                Vec::new()
            }
        };
        self.loading = false;
    }
}

#[cfg(test)]
#[path = "board_tests.rs"]
mod tests;
