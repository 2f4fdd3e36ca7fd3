//! Live server harness and shared world for notes behaviour tests.
//!
//! The harness owns a single-threaded Tokio runtime plus a `LocalSet` because
//! Actix uses `spawn_local` internally. Dropping the [`WorldFixture`] stops the
//! server even if a step panics.

use std::cell::RefCell;
use std::net::TcpListener;
use std::rc::Rc;
use std::sync::Arc;

use actix_web::dev::ServerHandle;
use actix_web::http::{Method, header};
use actix_web::{App, HttpServer, web};
use awc::Client;
use notes_backend::Trace;
use notes_backend::domain::{NotesService, TRACE_ID_HEADER};
use notes_backend::inbound::http::configure;
use notes_backend::inbound::http::health::HealthState;
use notes_backend::inbound::http::identity::ANON_ID_HEADER;
use notes_backend::inbound::http::state::HttpState;
use notes_backend::outbound::memory::InMemoryNoteRepository;
use serde_json::Value;
use tokio::runtime::Runtime;
use tokio::task::LocalSet;

pub(crate) struct NotesWorld {
    pub(crate) runtime: Runtime,
    pub(crate) local: LocalSet,
    pub(crate) base_url: String,
    pub(crate) server: ServerHandle,
    pub(crate) last_status: Option<u16>,
    pub(crate) last_body: Option<Value>,
    pub(crate) last_cache_control: Option<String>,
    pub(crate) last_trace_id: Option<String>,
    pub(crate) last_created_id: Option<i64>,
}

pub(crate) type SharedWorld = Rc<RefCell<NotesWorld>>;

pub(crate) struct WorldFixture {
    world: SharedWorld,
}

impl WorldFixture {
    pub(crate) fn world(&self) -> SharedWorld {
        self.world.clone()
    }
}

impl Drop for WorldFixture {
    fn drop(&mut self) {
        let ctx = self.world.borrow();
        let server = ctx.server.clone();
        ctx.local.block_on(&ctx.runtime, async move {
            server.stop(true).await;
        });
    }
}

fn with_world_async<R, F>(world: &SharedWorld, operation: impl FnOnce(String) -> F) -> R
where
    F: std::future::Future<Output = R>,
{
    let ctx = world.borrow();
    let base_url = ctx.base_url.clone();
    ctx.local.block_on(&ctx.runtime, operation(base_url))
}

async fn spawn_notes_server() -> Result<(String, ServerHandle), String> {
    let listener = TcpListener::bind("127.0.0.1:0").map_err(|err| err.to_string())?;
    let addr = listener.local_addr().map_err(|err| err.to_string())?;

    let service = Arc::new(NotesService::new(Arc::new(
        InMemoryNoteRepository::default(),
    )));
    let http_data = web::Data::new(HttpState::from_service(service));
    let health_data = web::Data::new(HealthState::new());
    health_data.mark_ready();

    let server = HttpServer::new(move || {
        App::new()
            .app_data(http_data.clone())
            .app_data(health_data.clone())
            .wrap(Trace)
            .configure(configure)
    })
    .disable_signals()
    .workers(1)
    .listen(listener)
    .map_err(|err| err.to_string())?
    .run();

    let handle = server.handle();
    actix_web::rt::spawn(server);

    Ok((format!("http://{addr}"), handle))
}

/// Start a server over a fresh in-memory store.
pub(crate) fn world() -> WorldFixture {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("tokio runtime");
    let local = LocalSet::new();
    let (base_url, server) = local
        .block_on(&runtime, spawn_notes_server())
        .expect("notes server should start");

    WorldFixture {
        world: Rc::new(RefCell::new(NotesWorld {
            runtime,
            local,
            base_url,
            server,
            last_status: None,
            last_body: None,
            last_cache_control: None,
            last_trace_id: None,
            last_created_id: None,
        })),
    }
}

/// One request against the running server.
pub(crate) struct NotesRequest<'a> {
    pub(crate) method: Method,
    pub(crate) path: &'a str,
    pub(crate) anon_id: Option<&'a str>,
    pub(crate) payload: Option<Value>,
}

/// Send `request` and record status, headers, and body on the world.
pub(crate) fn perform(world: &SharedWorld, request: NotesRequest<'_>) {
    let NotesRequest {
        method,
        path,
        anon_id,
        payload,
    } = request;
    let (status, cache_control, trace_id, body) =
        with_world_async(world, |base_url| async move {
            let mut builder = Client::default().request(method, format!("{base_url}{path}"));
            if let Some(anon_id) = anon_id {
                builder = builder.insert_header((ANON_ID_HEADER, anon_id));
            }
            let mut response = match payload {
                Some(payload) => builder.send_json(&payload).await.expect("json request"),
                None => builder.send().await.expect("request"),
            };
            let cache_control = response
                .headers()
                .get(header::CACHE_CONTROL)
                .and_then(|value| value.to_str().ok())
                .map(str::to_owned);
            let trace_id = response
                .headers()
                .get(TRACE_ID_HEADER)
                .and_then(|value| value.to_str().ok())
                .map(str::to_owned);
            let status = response.status().as_u16();
            let bytes = response.body().await.expect("body");
            let body = (!bytes.is_empty())
                .then(|| serde_json::from_slice::<Value>(&bytes).expect("json body"));
            (status, cache_control, trace_id, body)
        });

    let mut ctx = world.borrow_mut();
    if status == 201 {
        ctx.last_created_id = body
            .as_ref()
            .and_then(|body| body.get("id"))
            .and_then(Value::as_i64);
    }
    ctx.last_status = Some(status);
    ctx.last_cache_control = cache_control;
    ctx.last_trace_id = trace_id;
    ctx.last_body = body;
}
