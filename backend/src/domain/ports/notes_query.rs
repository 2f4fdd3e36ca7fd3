//! Driving port for reading notes.

use async_trait::async_trait;

use crate::domain::{Error, Note, OwnerId};

/// Read-side use cases consumed by inbound adapters.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NotesQuery: Send + Sync {
    /// List the caller's notes.
    ///
    /// A caller without an identity owns nothing, so `None` yields an empty
    /// list rather than an error.
    async fn list_notes(&self, owner: Option<OwnerId>) -> Result<Vec<Note>, Error>;
}
