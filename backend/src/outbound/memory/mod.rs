//! In-process adapters used when no database is configured and in tests.

mod note_repository;

pub use note_repository::InMemoryNoteRepository;
