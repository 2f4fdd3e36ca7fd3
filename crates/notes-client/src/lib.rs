//! Client for the anonymous notes service.
//!
//! The crate mints and persists an anonymous identity, talks to the service
//! over HTTP, and keeps a local [`NotesBoard`] in step with it. The `notes`
//! binary is a thin command-line front end over the same board.

pub mod api;
pub mod board;
pub mod cli;
pub mod error;
pub mod identity;

pub use api::{HttpNotesApi, Note, NoteInput, NotesApi};
pub use board::{NoteForm, NotesBoard};
pub use error::{ClientError, IdentityError};
pub use identity::{FileIdentityStore, IdentityStore, MemoryIdentityStore, mint_identity};
