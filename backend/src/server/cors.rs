//! Cross-origin policy for browser clients.

use actix_cors::Cors;
use actix_web::http::header::{self, HeaderName, HeaderValue};
use actix_web::http::{Method, Uri};
use actix_web::middleware::Condition;
use tracing::{info, warn};

use notes_backend::domain::TRACE_ID_HEADER;

const MAX_AGE_SECS: usize = 3600;

/// Build the CORS middleware for the configured origins.
///
/// Origins that do not parse as both a URI and a header value, and the `*`
/// wildcard, are skipped with a warning. With no usable origins the middleware is disabled
/// and responses carry no CORS headers.
pub(crate) fn build_cors(origins: &[String]) -> Condition<Cors> {
    let mut cors = Cors::default()
        .allowed_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allowed_headers([
            header::CONTENT_TYPE,
            header::CACHE_CONTROL,
            HeaderName::from_static("x-anon-id"),
        ])
        .expose_headers([HeaderName::from_static(TRACE_ID_HEADER)])
        .max_age(MAX_AGE_SECS);

    let mut accepted = 0_usize;
    for origin in origins {
        if origin == "*" {
            warn!(origin, "wildcard CORS origin ignored; list origins explicitly");
            continue;
        }
        match validate_origin(origin) {
            Ok(()) => {
                cors = cors.allowed_origin(origin);
                accepted += 1;
            }
            Err(error) => warn!(origin, %error, "invalid CORS origin ignored"),
        }
    }

    if accepted > 0 {
        info!(origins = accepted, "CORS enabled");
    }
    Condition::new(accepted > 0, cors)
}

// `Cors::allowed_origin` records a URI parse failure and then refuses to
// build, which would take the whole app factory down with it.
fn validate_origin(origin: &str) -> Result<(), String> {
    origin
        .parse::<Uri>()
        .map_err(|error| error.to_string())?;
    HeaderValue::from_str(origin).map_err(|error| error.to_string())?;
    Ok(())
}
