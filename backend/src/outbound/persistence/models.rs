//! Row structs mapping the `notes` table to Rust.

use chrono::{DateTime, Utc};
use diesel::prelude::*;

use crate::domain::ports::NoteRepositoryError;
use crate::domain::{Note, NoteId, OwnerId};

use super::schema::notes;

/// Row read from `notes`.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = notes)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct NoteRow {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub owner_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insertable note; the database assigns id and timestamps.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = notes)]
pub(crate) struct NewNoteRow<'a> {
    pub title: &'a str,
    pub content: &'a str,
    pub owner_id: &'a str,
}

/// Editable columns of a note.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = notes)]
pub(crate) struct NoteChangeset<'a> {
    pub title: &'a str,
    pub content: &'a str,
}

impl TryFrom<NoteRow> for Note {
    type Error = NoteRepositoryError;

    fn try_from(row: NoteRow) -> Result<Self, Self::Error> {
        let id = NoteId::new(row.id)
            .map_err(|err| NoteRepositoryError::query(format!("invalid stored note id: {err}")))?;
        let owner_id = OwnerId::new(&row.owner_id)
            .map_err(|err| NoteRepositoryError::query(format!("invalid stored owner: {err}")))?;
        Ok(Note {
            id,
            title: row.title,
            content: row.content,
            owner_id,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}
