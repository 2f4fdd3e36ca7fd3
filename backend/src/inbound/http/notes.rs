//! Notes HTTP handlers.
//!
//! ```text
//! GET    /notes
//! POST   /notes
//! PUT    /notes/{id}
//! DELETE /notes/{id}
//! ```
//!
//! Every route reads the caller's identity from `X-ANON-ID`. Listing without
//! an identity yields an empty array; mutations require it.

use actix_web::http::header;
use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::Note;
use crate::inbound::http::ApiResult;
use crate::inbound::http::identity::AnonIdentity;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{parse_note_draft, parse_note_id};

/// Request body for creating or updating a note.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct NoteRequest {
    /// Required and non-blank.
    #[schema(example = "Groceries")]
    pub title: Option<String>,
    /// Optional; stored as an empty string when omitted.
    #[schema(example = "milk, eggs")]
    pub content: Option<String>,
}

/// Note as returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NoteResponse {
    /// Store-assigned identifier.
    #[schema(example = 1)]
    pub id: i64,
    /// Note title.
    pub title: String,
    /// Note body.
    pub content: String,
    /// RFC 3339 creation timestamp.
    #[schema(example = "2024-01-01T12:00:00+00:00")]
    pub created_at: String,
    /// RFC 3339 timestamp of the last update.
    #[schema(example = "2024-01-01T12:00:00+00:00")]
    pub updated_at: String,
}

impl From<Note> for NoteResponse {
    fn from(value: Note) -> Self {
        Self {
            id: value.id.get(),
            title: value.title,
            content: value.content,
            created_at: value.created_at.to_rfc3339(),
            updated_at: value.updated_at.to_rfc3339(),
        }
    }
}

/// List the caller's notes, newest first.
#[utoipa::path(
    get,
    path = "/notes",
    params(
        ("X-ANON-ID" = Option<String>, Header, description = "Anonymous owner identifier")
    ),
    responses(
        (
            status = 200,
            description = "Notes owned by the caller; empty without an identity",
            headers(("Cache-Control" = String, description = "Always no-store")),
            body = [NoteResponse]
        ),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["notes"],
    operation_id = "listNotes"
)]
#[get("/notes")]
pub async fn list_notes(
    state: web::Data<HttpState>,
    identity: AnonIdentity,
) -> ApiResult<HttpResponse> {
    let notes = state.notes_query.list_notes(identity.into_owner()).await?;
    let body: Vec<NoteResponse> = notes.into_iter().map(NoteResponse::from).collect();
    Ok(HttpResponse::Ok()
        .insert_header((header::CACHE_CONTROL, "no-store"))
        .json(body))
}

/// Create a note owned by the caller.
#[utoipa::path(
    post,
    path = "/notes",
    request_body = NoteRequest,
    params(
        ("X-ANON-ID" = String, Header, description = "Anonymous owner identifier")
    ),
    responses(
        (status = 201, description = "Created note", body = NoteResponse),
        (status = 400, description = "Missing identity or title", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["notes"],
    operation_id = "createNote"
)]
#[post("/notes")]
pub async fn create_note(
    state: web::Data<HttpState>,
    identity: AnonIdentity,
    payload: web::Json<NoteRequest>,
) -> ApiResult<HttpResponse> {
    let owner = identity.require()?;
    let NoteRequest { title, content } = payload.into_inner();
    let draft = parse_note_draft(title, content)?;

    let note = state.notes.create_note(&owner, draft).await?;
    Ok(HttpResponse::Created().json(NoteResponse::from(note)))
}

/// Update title and content of one of the caller's notes.
#[utoipa::path(
    put,
    path = "/notes/{id}",
    request_body = NoteRequest,
    params(
        ("id" = i64, Path, description = "Note identifier"),
        ("X-ANON-ID" = String, Header, description = "Anonymous owner identifier")
    ),
    responses(
        (status = 200, description = "Updated note", body = NoteResponse),
        (status = 400, description = "Missing identity, invalid id, or missing title", body = ErrorSchema),
        (status = 404, description = "Note not found or owned by another identity", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["notes"],
    operation_id = "updateNote"
)]
#[put("/notes/{id}")]
pub async fn update_note(
    state: web::Data<HttpState>,
    identity: AnonIdentity,
    path: web::Path<String>,
    payload: web::Json<NoteRequest>,
) -> ApiResult<web::Json<NoteResponse>> {
    let owner = identity.require()?;
    let id = parse_note_id(&path)?;
    let NoteRequest { title, content } = payload.into_inner();
    let draft = parse_note_draft(title, content)?;

    let note = state.notes.update_note(&owner, id, draft).await?;
    Ok(web::Json(NoteResponse::from(note)))
}

/// Delete one of the caller's notes.
#[utoipa::path(
    delete,
    path = "/notes/{id}",
    params(
        ("id" = i64, Path, description = "Note identifier"),
        ("X-ANON-ID" = String, Header, description = "Anonymous owner identifier")
    ),
    responses(
        (status = 204, description = "Note deleted"),
        (status = 400, description = "Missing identity or invalid id", body = ErrorSchema),
        (status = 404, description = "Note not found or owned by another identity", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["notes"],
    operation_id = "deleteNote"
)]
#[delete("/notes/{id}")]
pub async fn delete_note(
    state: web::Data<HttpState>,
    identity: AnonIdentity,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let owner = identity.require()?;
    let id = parse_note_id(&path)?;

    state.notes.delete_note(&owner, id).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
#[path = "notes_tests.rs"]
mod tests;
