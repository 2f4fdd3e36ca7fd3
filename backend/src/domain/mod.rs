//! Domain primitives, ports and services.
//!
//! Purpose: define the notes model and the use cases that operate on it,
//! independent of HTTP and of the storage engine.
//!
//! Public surface:
//! - `Error` / `ErrorCode`: transport-agnostic failure payload.
//! - `OwnerId`: anonymous client identity scoping every note.
//! - `Note`, `NoteId`, `NoteDraft`: the note aggregate and validated input.
//! - `NotesService`: implementation of the `NotesQuery` and `NotesCommand`
//!   driving ports.

pub mod error;
pub mod note;
pub mod notes_service;
pub mod owner;
pub mod ports;
pub mod trace_id;

pub use self::error::{Error, ErrorCode, ErrorValidationError, TRACE_ID_HEADER};
pub use self::note::{
    Note, NoteDraft, NoteDraftValidationError, NoteId, NoteIdValidationError,
};
pub use self::notes_service::{NOTE_NOT_FOUND_MESSAGE, NotesService};
pub use self::owner::{OwnerId, OwnerIdValidationError};
pub use self::trace_id::TraceId;
