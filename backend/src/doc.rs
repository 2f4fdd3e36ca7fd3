//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers the notes and health endpoints together with the
//! request, response, and error schemas. Identity travels in the `X-ANON-ID`
//! header, documented as an API key scheme. The document backs Swagger UI in
//! debug builds and the `openapi-dump` binary.

use crate::inbound::http::health::StatusResponse;
use crate::inbound::http::notes::{NoteRequest, NoteResponse};
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Register the anonymous identity header as a security scheme.
struct AnonIdentityAddon;

impl Modify for AnonIdentityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "AnonId",
            SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::with_description(
                "X-ANON-ID",
                "Client-minted anonymous identifier scoping every note.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&AnonIdentityAddon),
    info(
        title = "Notes backend API",
        description = "Notes scoped to an anonymous client identity, plus health probes."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::notes::list_notes,
        crate::inbound::http::notes::create_note,
        crate::inbound::http::notes::update_note,
        crate::inbound::http::notes::delete_note,
        crate::inbound::http::health::root,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        NoteRequest,
        NoteResponse,
        StatusResponse,
        ErrorSchema,
        ErrorCodeSchema
    )),
    tags(
        (name = "notes", description = "Create, list, update, and delete notes"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
