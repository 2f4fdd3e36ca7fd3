//! HTTP inbound adapter exposing the notes REST endpoints.

use actix_web::web;

pub mod error;
pub mod health;
pub mod identity;
pub mod notes;
pub mod schemas;
pub mod state;
pub mod validation;

pub use error::ApiResult;

/// Register every notes and health route.
///
/// Callers supply `web::Data<HttpState>` and `web::Data<HealthState>`.
///
/// [`HttpState`]: state::HttpState
/// [`HealthState`]: health::HealthState
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(health::root)
        .service(health::ready)
        .service(health::live)
        .service(notes::list_notes)
        .service(notes::create_note)
        .service(notes::update_note)
        .service(notes::delete_note);
}
