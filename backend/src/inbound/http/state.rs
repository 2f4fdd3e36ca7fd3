//! Shared HTTP adapter state.
//!
//! Handlers receive this through `web::Data` and only see the driving ports,
//! so they can be exercised without any storage behind them.

use std::sync::Arc;

use crate::domain::ports::{NotesCommand, NotesQuery};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Mutating note use cases.
    pub notes: Arc<dyn NotesCommand>,
    /// Read-only note use cases.
    pub notes_query: Arc<dyn NotesQuery>,
}

impl HttpState {
    /// Construct state from separate command and query ports.
    pub fn new(notes: Arc<dyn NotesCommand>, notes_query: Arc<dyn NotesQuery>) -> Self {
        Self { notes, notes_query }
    }

    /// Construct state from one service implementing both ports.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use notes_backend::domain::NotesService;
    /// use notes_backend::inbound::http::state::HttpState;
    /// use notes_backend::outbound::memory::InMemoryNoteRepository;
    ///
    /// let service = NotesService::new(Arc::new(InMemoryNoteRepository::default()));
    /// let _state = HttpState::from_service(Arc::new(service));
    /// ```
    pub fn from_service<S>(service: Arc<S>) -> Self
    where
        S: NotesCommand + NotesQuery + 'static,
    {
        Self {
            notes: service.clone(),
            notes_query: service,
        }
    }
}
