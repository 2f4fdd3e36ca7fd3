//! Handler tests for the notes routes over the in-memory repository.

use std::sync::Arc;

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{App, test, web};
use rstest::rstest;
use serde_json::{Value, json};

use super::*;
use crate::Trace;
use crate::domain::ports::{MockNotesCommand, MockNotesQuery};
use crate::domain::{Error, NotesService};
use crate::inbound::http::health::HealthState;
use crate::inbound::http::identity::ANON_ID_HEADER;
use crate::outbound::memory::InMemoryNoteRepository;

fn notes_app(
    state: HttpState,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .wrap(Trace)
        .app_data(web::Data::new(state))
        .app_data(web::Data::new(HealthState::new()))
        .configure(crate::inbound::http::configure)
}

fn memory_state() -> HttpState {
    let repo = Arc::new(InMemoryNoteRepository::default());
    HttpState::from_service(Arc::new(NotesService::new(repo)))
}

fn create_request(owner: Option<&str>, body: Value) -> test::TestRequest {
    let req = test::TestRequest::post().uri("/notes").set_json(body);
    match owner {
        Some(owner) => req.insert_header((ANON_ID_HEADER, owner)),
        None => req,
    }
}

fn list_request(owner: Option<&str>) -> test::TestRequest {
    let req = test::TestRequest::get().uri("/notes");
    match owner {
        Some(owner) => req.insert_header((ANON_ID_HEADER, owner)),
        None => req,
    }
}

fn update_request(owner: Option<&str>, raw_id: &str, body: Value) -> test::TestRequest {
    let req = test::TestRequest::put()
        .uri(&format!("/notes/{raw_id}"))
        .set_json(body);
    match owner {
        Some(owner) => req.insert_header((ANON_ID_HEADER, owner)),
        None => req,
    }
}

fn error_detail(body: &Value, key: &str) -> Option<String> {
    body.get("details")
        .and_then(|details| details.get(key))
        .and_then(Value::as_str)
        .map(str::to_owned)
}

#[actix_web::test]
async fn created_note_is_listed_only_for_its_owner() {
    let app = test::init_service(notes_app(memory_state())).await;

    let res = test::call_service(
        &app,
        create_request(Some("u1"), json!({"title": "T", "content": "C"})).to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::CREATED);
    let created: NoteResponse = test::read_body_json(res).await;
    assert_eq!(created.title, "T");
    assert_eq!(created.content, "C");
    assert!(created.id > 0);

    let mine: Vec<NoteResponse> =
        test::call_and_read_body_json(&app, list_request(Some("u1")).to_request()).await;
    assert_eq!(mine, vec![created]);

    let theirs: Vec<NoteResponse> =
        test::call_and_read_body_json(&app, list_request(Some("u2")).to_request()).await;
    assert!(theirs.is_empty());
}

#[rstest]
#[case(None)]
#[case(Some("   "))]
#[actix_web::test]
async fn list_without_identity_is_empty(#[case] owner: Option<&str>) {
    let app = test::init_service(notes_app(memory_state())).await;
    test::call_service(
        &app,
        create_request(Some("u1"), json!({"title": "T"})).to_request(),
    )
    .await;

    let res = test::call_service(&app, list_request(owner).to_request()).await;

    assert_eq!(res.status(), StatusCode::OK);
    let body: Vec<NoteResponse> = test::read_body_json(res).await;
    assert!(body.is_empty());
}

#[actix_web::test]
async fn list_returns_newest_first() {
    let app = test::init_service(notes_app(memory_state())).await;
    for title in ["first", "second", "third"] {
        test::call_service(
            &app,
            create_request(Some("u1"), json!({"title": title})).to_request(),
        )
        .await;
    }

    let notes: Vec<NoteResponse> =
        test::call_and_read_body_json(&app, list_request(Some("u1")).to_request()).await;

    let titles: Vec<&str> = notes.iter().map(|note| note.title.as_str()).collect();
    assert_eq!(titles, ["third", "second", "first"]);
}

#[rstest]
#[case(None, json!({"title": "T"}), "X-ANON-ID", "missing_header")]
#[case(Some("u1"), json!({"content": "C"}), "title", "missing_field")]
#[case(Some("u1"), json!({"title": "", "content": "C"}), "title", "blank_field")]
#[case(Some("u1"), json!({"title": "  "}), "title", "blank_field")]
#[actix_web::test]
async fn create_rejects_invalid_requests_without_persisting(
    #[case] owner: Option<&str>,
    #[case] body: Value,
    #[case] field: &str,
    #[case] code: &str,
) {
    let app = test::init_service(notes_app(memory_state())).await;

    let res = test::call_service(&app, create_request(owner, body).to_request()).await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let payload: Value = test::read_body_json(res).await;
    assert_eq!(payload["code"], "invalid_request");
    assert_eq!(error_detail(&payload, "field").as_deref(), Some(field));
    assert_eq!(error_detail(&payload, "code").as_deref(), Some(code));

    let notes: Vec<NoteResponse> =
        test::call_and_read_body_json(&app, list_request(Some("u1")).to_request()).await;
    assert!(notes.is_empty());
}

#[actix_web::test]
async fn create_defaults_missing_content() {
    let app = test::init_service(notes_app(memory_state())).await;

    let created: NoteResponse = test::call_and_read_body_json(
        &app,
        create_request(Some("u1"), json!({"title": "T"})).to_request(),
    )
    .await;

    assert_eq!(created.content, "");
}

#[actix_web::test]
async fn update_replaces_title_and_content() {
    let app = test::init_service(notes_app(memory_state())).await;
    let created: NoteResponse = test::call_and_read_body_json(
        &app,
        create_request(Some("u1"), json!({"title": "T", "content": "C"})).to_request(),
    )
    .await;

    let res = test::call_service(
        &app,
        test::TestRequest::put()
            .uri(&format!("/notes/{}", created.id))
            .insert_header((ANON_ID_HEADER, "u1"))
            .set_json(json!({"title": "T2", "content": "C2"}))
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::OK);
    let updated: NoteResponse = test::read_body_json(res).await;
    assert_eq!(updated.id, created.id);
    assert_eq!(updated.title, "T2");
    assert_eq!(updated.content, "C2");
    assert_eq!(updated.created_at, created.created_at);
}

#[actix_web::test]
async fn foreign_notes_cannot_be_updated_or_deleted() {
    let app = test::init_service(notes_app(memory_state())).await;
    let created: NoteResponse = test::call_and_read_body_json(
        &app,
        create_request(Some("u1"), json!({"title": "T", "content": "C"})).to_request(),
    )
    .await;
    let uri = format!("/notes/{}", created.id);

    let update = test::call_service(
        &app,
        test::TestRequest::put()
            .uri(&uri)
            .insert_header((ANON_ID_HEADER, "u2"))
            .set_json(json!({"title": "stolen"}))
            .to_request(),
    )
    .await;
    assert_eq!(update.status(), StatusCode::NOT_FOUND);

    let delete = test::call_service(
        &app,
        test::TestRequest::delete()
            .uri(&uri)
            .insert_header((ANON_ID_HEADER, "u2"))
            .to_request(),
    )
    .await;
    assert_eq!(delete.status(), StatusCode::NOT_FOUND);

    let notes: Vec<NoteResponse> =
        test::call_and_read_body_json(&app, list_request(Some("u1")).to_request()).await;
    assert_eq!(notes, vec![created]);
}

#[actix_web::test]
async fn delete_is_not_repeatable() {
    let app = test::init_service(notes_app(memory_state())).await;
    let created: NoteResponse = test::call_and_read_body_json(
        &app,
        create_request(Some("u1"), json!({"title": "T"})).to_request(),
    )
    .await;
    let delete = || {
        test::TestRequest::delete()
            .uri(&format!("/notes/{}", created.id))
            .insert_header((ANON_ID_HEADER, "u1"))
            .to_request()
    };

    let first = test::call_service(&app, delete()).await;
    assert_eq!(first.status(), StatusCode::NO_CONTENT);
    assert!(test::read_body(first).await.is_empty());

    let second = test::call_service(&app, delete()).await;
    assert_eq!(second.status(), StatusCode::NOT_FOUND);

    let notes: Vec<NoteResponse> =
        test::call_and_read_body_json(&app, list_request(Some("u1")).to_request()).await;
    assert!(notes.is_empty());
}

#[rstest]
#[case(None, "1", json!({"title": "T2"}), "X-ANON-ID", "missing_header")]
#[case(Some("u1"), "abc", json!({"title": "T2"}), "id", "invalid_note_id")]
#[case(Some("u1"), "0", json!({"title": "T2"}), "id", "invalid_note_id")]
#[case(Some("u1"), "+1", json!({"title": "T2"}), "id", "invalid_note_id")]
#[case(Some("u1"), "1", json!({"content": "C2"}), "title", "missing_field")]
#[case(Some("u1"), "1", json!({"title": "  ", "content": "C2"}), "title", "blank_field")]
#[actix_web::test]
async fn update_rejects_invalid_requests_without_changes(
    #[case] owner: Option<&str>,
    #[case] raw_id: &str,
    #[case] body: Value,
    #[case] field: &str,
    #[case] code: &str,
) {
    let app = test::init_service(notes_app(memory_state())).await;
    let created: NoteResponse = test::call_and_read_body_json(
        &app,
        create_request(Some("u1"), json!({"title": "T", "content": "C"})).to_request(),
    )
    .await;
    assert_eq!(created.id, 1);

    let res = test::call_service(&app, update_request(owner, raw_id, body).to_request()).await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let payload: Value = test::read_body_json(res).await;
    assert_eq!(payload["code"], "invalid_request");
    assert_eq!(error_detail(&payload, "field").as_deref(), Some(field));
    assert_eq!(error_detail(&payload, "code").as_deref(), Some(code));

    let notes: Vec<NoteResponse> =
        test::call_and_read_body_json(&app, list_request(Some("u1")).to_request()).await;
    assert_eq!(notes, vec![created]);
}

#[actix_web::test]
async fn update_of_unknown_note_is_not_found() {
    let app = test::init_service(notes_app(memory_state())).await;

    let res = test::call_service(
        &app,
        update_request(Some("u1"), "999", json!({"title": "T"})).to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let payload: Value = test::read_body_json(res).await;
    assert_eq!(payload["code"], "not_found");
}

#[actix_web::test]
async fn delete_requires_identity() {
    let app = test::init_service(notes_app(memory_state())).await;
    let created: NoteResponse = test::call_and_read_body_json(
        &app,
        create_request(Some("u1"), json!({"title": "T"})).to_request(),
    )
    .await;

    let res = test::call_service(
        &app,
        test::TestRequest::delete()
            .uri(&format!("/notes/{}", created.id))
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let payload: Value = test::read_body_json(res).await;
    assert_eq!(error_detail(&payload, "field").as_deref(), Some("X-ANON-ID"));
    assert_eq!(
        error_detail(&payload, "code").as_deref(),
        Some("missing_header")
    );

    let notes: Vec<NoteResponse> =
        test::call_and_read_body_json(&app, list_request(Some("u1")).to_request()).await;
    assert_eq!(notes, vec![created]);
}

#[rstest]
#[case("abc")]
#[case("0")]
#[case("-4")]
#[case("+5")]
#[actix_web::test]
async fn invalid_ids_are_rejected(#[case] raw: &str) {
    let app = test::init_service(notes_app(memory_state())).await;

    let res = test::call_service(
        &app,
        test::TestRequest::delete()
            .uri(&format!("/notes/{raw}"))
            .insert_header((ANON_ID_HEADER, "u1"))
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let payload: Value = test::read_body_json(res).await;
    assert_eq!(
        error_detail(&payload, "code").as_deref(),
        Some("invalid_note_id")
    );
}

#[actix_web::test]
async fn store_failures_are_redacted() {
    let mut query = MockNotesQuery::new();
    query
        .expect_list_notes()
        .return_once(|_| Err(Error::internal("note store error: connection reset")));
    let state = HttpState::new(Arc::new(MockNotesCommand::new()), Arc::new(query));
    let app = test::init_service(notes_app(state)).await;

    let res = test::call_service(&app, list_request(Some("u1")).to_request()).await;

    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let trace_header = res
        .headers()
        .get(crate::domain::TRACE_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);
    let payload: Value = test::read_body_json(res).await;
    assert_eq!(payload["code"], "internal_error");
    assert_eq!(payload["message"], "Internal server error");
    assert_eq!(payload["traceId"].as_str(), trace_header.as_deref());
}
