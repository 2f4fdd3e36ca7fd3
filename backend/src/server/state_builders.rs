//! Builders wiring the note store into HTTP handler state.

use std::sync::Arc;

use actix_web::web;

use notes_backend::domain::NotesService;
use notes_backend::domain::ports::NoteRepository;
use notes_backend::inbound::http::state::HttpState;

use super::ServerConfig;

/// Wrap a repository in the notes service and expose it through both ports.
fn http_state_for(repository: Arc<dyn NoteRepository>) -> HttpState {
    HttpState::from_service(Arc::new(NotesService::new(repository)))
}

/// Build handler state over the store selected in `config`.
pub(crate) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    web::Data::new(http_state_for(config.repository()))
}
