//! Note aggregate and its input draft.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::OwnerId;

/// Validation errors for note identifiers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NoteIdValidationError {
    /// The identifier was not a positive decimal integer.
    #[error("note id must be a positive integer")]
    Invalid,
}

/// Validation errors for [`NoteDraft`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NoteDraftValidationError {
    /// The title was empty or whitespace only.
    #[error("title must not be blank")]
    BlankTitle,
}

/// Store-assigned note identifier. Always positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct NoteId(i64);

impl NoteId {
    /// Validate and construct a [`NoteId`].
    pub fn new(value: i64) -> Result<Self, NoteIdValidationError> {
        if value <= 0 {
            return Err(NoteIdValidationError::Invalid);
        }
        Ok(Self(value))
    }

    /// Raw integer value.
    #[must_use]
    pub fn get(self) -> i64 {
        self.0
    }
}

impl TryFrom<i64> for NoteId {
    type Error = NoteIdValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<NoteId> for i64 {
    fn from(value: NoteId) -> Self {
        value.0
    }
}

impl FromStr for NoteId {
    type Err = NoteIdValidationError;

    /// Parse a decimal path segment such as `"42"`. Signs are rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() || !s.bytes().all(|byte| byte.is_ascii_digit()) {
            return Err(NoteIdValidationError::Invalid);
        }
        let value = s
            .parse::<i64>()
            .map_err(|_| NoteIdValidationError::Invalid)?;
        Self::new(value)
    }
}

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Validated title and content for a create or update.
///
/// ## Invariants
/// - `title` is non-empty once trimmed. It is otherwise stored verbatim.
///
/// # Examples
/// ```
/// use notes_backend::domain::NoteDraft;
///
/// let draft = NoteDraft::new("Groceries", "").expect("title present");
/// assert_eq!(draft.title(), "Groceries");
/// assert!(NoteDraft::new("  ", "body").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteDraft {
    title: String,
    content: String,
}

impl NoteDraft {
    /// Validate and construct a draft.
    pub fn new(
        title: impl Into<String>,
        content: impl Into<String>,
    ) -> Result<Self, NoteDraftValidationError> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(NoteDraftValidationError::BlankTitle);
        }
        Ok(Self {
            title,
            content: content.into(),
        })
    }

    /// Note title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Note body, possibly empty.
    pub fn content(&self) -> &str {
        &self.content
    }
}

/// A persisted note.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Note {
    /// Store-assigned identifier.
    pub id: NoteId,
    /// Non-blank title.
    pub title: String,
    /// Body text; may be empty.
    pub content: String,
    /// Identity that created the note. Never changes.
    pub owner_id: OwnerId,
    /// Creation timestamp assigned by the store.
    pub created_at: DateTime<Utc>,
    /// Refreshed by the store on every update.
    pub updated_at: DateTime<Utc>,
}
