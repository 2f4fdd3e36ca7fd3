//! PostgreSQL-backed [`NoteRepository`] using Diesel.
//!
//! Update and delete carry both `id` and `owner_id` in their `WHERE` clause,
//! so ownership is checked by the same statement that writes. The returned
//! row (update) or affected-row count (delete) is the existence proof.

use async_trait::async_trait;
use diesel::dsl::now;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{NoteRepository, NoteRepositoryError};
use crate::domain::{Note, NoteDraft, NoteId, OwnerId};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{NewNoteRow, NoteChangeset, NoteRow};
use super::pool::DbPool;
use super::schema::notes;

/// Diesel implementation of [`NoteRepository`].
#[derive(Clone)]
pub struct DieselNoteRepository {
    pool: DbPool,
}

impl DieselNoteRepository {
    /// Create a repository over `pool`.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl NoteRepository for DieselNoteRepository {
    async fn list_for_owner(&self, owner: &OwnerId) -> Result<Vec<Note>, NoteRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<NoteRow> = notes::table
            .filter(notes::owner_id.eq(owner.as_ref()))
            .order((notes::created_at.desc(), notes::id.desc()))
            .select(NoteRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(Note::try_from).collect()
    }

    async fn create(
        &self,
        owner: &OwnerId,
        draft: &NoteDraft,
    ) -> Result<Note, NoteRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = NewNoteRow {
            title: draft.title(),
            content: draft.content(),
            owner_id: owner.as_ref(),
        };
        let inserted: NoteRow = diesel::insert_into(notes::table)
            .values(&row)
            .returning(NoteRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Note::try_from(inserted)
    }

    async fn update_owned(
        &self,
        id: NoteId,
        owner: &OwnerId,
        draft: &NoteDraft,
    ) -> Result<Option<Note>, NoteRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let changes = NoteChangeset {
            title: draft.title(),
            content: draft.content(),
        };
        let updated: Option<NoteRow> = diesel::update(
            notes::table
                .filter(notes::id.eq(id.get()))
                .filter(notes::owner_id.eq(owner.as_ref())),
        )
        .set((changes, notes::updated_at.eq(now)))
        .returning(NoteRow::as_returning())
        .get_result(&mut conn)
        .await
        .optional()
        .map_err(map_diesel_error)?;

        updated.map(Note::try_from).transpose()
    }

    async fn delete_owned(
        &self,
        id: NoteId,
        owner: &OwnerId,
    ) -> Result<bool, NoteRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let deleted = diesel::delete(
            notes::table
                .filter(notes::id.eq(id.get()))
                .filter(notes::owner_id.eq(owner.as_ref())),
        )
        .execute(&mut conn)
        .await
        .map_err(map_diesel_error)?;

        Ok(deleted > 0)
    }
}
