//! Anonymous identity extractor.
//!
//! Reads the `X-ANON-ID` header once per request and hands handlers a typed
//! [`AnonIdentity`]. Handlers decide whether an identity is optional (listing)
//! or required (mutations) by calling [`AnonIdentity::require`].

use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::{Ready, ready};
use tracing::debug;

use crate::domain::{Error, OwnerId};

use super::validation::{FieldName, missing_header_error};

/// Header carrying the client-minted anonymous identifier.
pub const ANON_ID_HEADER: &str = "X-ANON-ID";

const ANON_ID_FIELD: FieldName = FieldName::new(ANON_ID_HEADER);

/// Identity presented by the caller, if any.
///
/// A header that is absent, blank, or not valid UTF-8 yields an empty
/// identity.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AnonIdentity(Option<OwnerId>);

impl AnonIdentity {
    /// Borrow the owner when one was presented.
    pub fn owner(&self) -> Option<&OwnerId> {
        self.0.as_ref()
    }

    /// Consume the identity, yielding the owner when present.
    pub fn into_owner(self) -> Option<OwnerId> {
        self.0
    }

    /// Require an owner or fail with `400 Bad Request`.
    pub fn require(self) -> Result<OwnerId, Error> {
        self.0.ok_or_else(|| missing_header_error(ANON_ID_FIELD))
    }

    fn from_headers(req: &HttpRequest) -> Self {
        let Some(value) = req.headers().get(ANON_ID_HEADER) else {
            return Self(None);
        };
        let owner = match value.to_str() {
            Ok(raw) => OwnerId::new(raw).ok(),
            Err(error) => {
                debug!(%error, "ignoring non-UTF-8 anonymous identity header");
                None
            }
        };
        Self(owner)
    }
}

impl FromRequest for AnonIdentity {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(Ok(Self::from_headers(req)))
    }
}
