//! Error types for the notes client.

use camino::Utf8PathBuf;
use thiserror::Error;

/// Failures reading or writing the persisted anonymous identity.
#[derive(Debug, Error)]
pub enum IdentityError {
    /// The configured path does not name a file.
    #[error("identity path must name a file: {path}")]
    InvalidPath {
        /// Rejected path.
        path: Utf8PathBuf,
    },
    /// The identity file or its directory could not be accessed.
    #[error("identity file {path}: {source}")]
    Io {
        /// File or directory that failed.
        path: Utf8PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
}

/// Errors surfaced by API calls and board operations.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The service answered with an unexpected status.
    #[error("request failed: {status} {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Raw response body, possibly empty.
        body: String,
    },
    /// The request never produced a response.
    #[error("transport error: {message}")]
    Transport {
        /// Description of the failure.
        message: String,
    },
    /// The response body was not the expected JSON.
    #[error("invalid response body: {message}")]
    Decode {
        /// Description of the failure.
        message: String,
    },
    /// No note with this id is on the board.
    #[error("note {id} is not on the board")]
    UnknownNote {
        /// Requested note id.
        id: i64,
    },
    /// The identity store failed.
    #[error(transparent)]
    Identity(#[from] IdentityError),
}

impl ClientError {
    /// HTTP status carried by [`ClientError::Status`].
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}
