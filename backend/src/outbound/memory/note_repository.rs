//! Memory-backed [`NoteRepository`].
//!
//! Mirrors the PostgreSQL adapter's semantics: ids are assigned from a
//! monotonically increasing sequence, listings are ordered by creation time
//! then id (both descending), and mutations match on id and owner together.
//! State is lost when the process exits.

use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use mockable::{Clock, DefaultClock};

use crate::domain::ports::{NoteRepository, NoteRepositoryError};
use crate::domain::{Note, NoteDraft, NoteId, OwnerId};

#[derive(Debug, Default)]
struct MemoryState {
    last_id: i64,
    notes: Vec<Note>,
}

/// Note store held in process memory.
pub struct InMemoryNoteRepository {
    state: Mutex<MemoryState>,
    clock: Arc<dyn Clock>,
}

impl Default for InMemoryNoteRepository {
    fn default() -> Self {
        Self::with_clock(Arc::new(DefaultClock))
    }
}

impl InMemoryNoteRepository {
    /// Create an empty store stamping timestamps from `clock`.
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            state: Mutex::new(MemoryState::default()),
            clock,
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, MemoryState>, NoteRepositoryError> {
        self.state
            .lock()
            .map_err(|_| NoteRepositoryError::query("memory note store lock poisoned"))
    }
}

#[async_trait]
impl NoteRepository for InMemoryNoteRepository {
    async fn list_for_owner(&self, owner: &OwnerId) -> Result<Vec<Note>, NoteRepositoryError> {
        let state = self.lock()?;
        let mut notes: Vec<Note> = state
            .notes
            .iter()
            .filter(|note| &note.owner_id == owner)
            .cloned()
            .collect();
        notes.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        Ok(notes)
    }

    async fn create(
        &self,
        owner: &OwnerId,
        draft: &NoteDraft,
    ) -> Result<Note, NoteRepositoryError> {
        let mut state = self.lock()?;
        let next = state
            .last_id
            .checked_add(1)
            .ok_or_else(|| NoteRepositoryError::query("note id sequence exhausted"))?;
        let id = NoteId::new(next).map_err(|err| NoteRepositoryError::query(err.to_string()))?;
        let now = self.clock.utc();
        let note = Note {
            id,
            title: draft.title().to_owned(),
            content: draft.content().to_owned(),
            owner_id: owner.clone(),
            created_at: now,
            updated_at: now,
        };
        state.last_id = next;
        state.notes.push(note.clone());
        Ok(note)
    }

    async fn update_owned(
        &self,
        id: NoteId,
        owner: &OwnerId,
        draft: &NoteDraft,
    ) -> Result<Option<Note>, NoteRepositoryError> {
        let mut state = self.lock()?;
        let now = self.clock.utc();
        let updated = state
            .notes
            .iter_mut()
            .find(|note| note.id == id && &note.owner_id == owner)
            .map(|note| {
                note.title = draft.title().to_owned();
                note.content = draft.content().to_owned();
                note.updated_at = now;
                note.clone()
            });
        Ok(updated)
    }

    async fn delete_owned(
        &self,
        id: NoteId,
        owner: &OwnerId,
    ) -> Result<bool, NoteRepositoryError> {
        let mut state = self.lock()?;
        let before = state.notes.len();
        state
            .notes
            .retain(|note| !(note.id == id && &note.owner_id == owner));
        Ok(state.notes.len() != before)
    }
}
