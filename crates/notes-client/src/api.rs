//! HTTP access to the notes service.

use std::time::{SystemTime, UNIX_EPOCH};

use async_trait::async_trait;
use reqwest::header::CACHE_CONTROL;
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::{Deserialize, Serialize};

use crate::error::ClientError;

/// Header carrying the anonymous identity.
pub const ANON_ID_HEADER: &str = "X-ANON-ID";

/// Default service location.
pub const DEFAULT_API_URL: &str = "http://localhost:5000";

/// A note as returned by the service.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    /// Store-assigned identifier.
    pub id: i64,
    /// Note title.
    pub title: String,
    /// Note body, possibly empty.
    pub content: String,
    /// Creation timestamp, RFC 3339.
    #[serde(default)]
    pub created_at: Option<String>,
    /// Last update timestamp, RFC 3339.
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// Body sent on create and update.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NoteInput {
    /// Note title.
    pub title: String,
    /// Note body.
    pub content: String,
}

/// Port for the notes service calls the board makes.
#[async_trait]
pub trait NotesApi: Send + Sync {
    /// Notes owned by `identity`.
    async fn list(&self, identity: &str) -> Result<Vec<Note>, ClientError>;
    /// Create a note owned by `identity`.
    async fn create(&self, identity: &str, input: &NoteInput) -> Result<Note, ClientError>;
    /// Replace the title and content of note `id`.
    async fn update(&self, identity: &str, id: i64, input: &NoteInput)
    -> Result<Note, ClientError>;
    /// Delete note `id`.
    async fn delete(&self, identity: &str, id: i64) -> Result<(), ClientError>;
}

/// [`NotesApi`] over HTTP with `reqwest`.
///
/// Every request carries the identity header, `Cache-Control: no-store`, and
/// a `_` query parameter holding the current epoch milliseconds.
#[derive(Debug, Clone)]
pub struct HttpNotesApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpNotesApi {
    /// Create a client for the service at `base_url`.
    ///
    /// # Examples
    /// ```
    /// use notes_client::HttpNotesApi;
    ///
    /// let api = HttpNotesApi::new("http://localhost:5000/");
    /// assert_eq!(api.base_url(), "http://localhost:5000");
    /// ```
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    /// Create a client reusing an existing `reqwest::Client`.
    #[must_use]
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_owned();
        Self { client, base_url }
    }

    /// Service location without a trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str, identity: &str) -> RequestBuilder {
        self.client
            .request(method, format!("{}{path}", self.base_url))
            .query(&[("_", cache_buster())])
            .header(ANON_ID_HEADER, identity)
            .header(CACHE_CONTROL, "no-store")
    }
}

fn cache_buster() -> String {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| elapsed.as_millis())
        .to_string()
}

async fn send_expecting(
    request: RequestBuilder,
    expected: StatusCode,
) -> Result<Response, ClientError> {
    let response = request.send().await.map_err(|err| ClientError::Transport {
        message: err.to_string(),
    })?;
    let status = response.status();
    if status == expected {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(ClientError::Status {
        status: status.as_u16(),
        body,
    })
}

async fn decode<T: serde::de::DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    response.json().await.map_err(|err| ClientError::Decode {
        message: err.to_string(),
    })
}

#[async_trait]
impl NotesApi for HttpNotesApi {
    async fn list(&self, identity: &str) -> Result<Vec<Note>, ClientError> {
        let response =
            send_expecting(self.request(Method::GET, "/notes", identity), StatusCode::OK).await?;
        decode(response).await
    }

    async fn create(&self, identity: &str, input: &NoteInput) -> Result<Note, ClientError> {
        let request = self.request(Method::POST, "/notes", identity).json(input);
        decode(send_expecting(request, StatusCode::CREATED).await?).await
    }

    async fn update(
        &self,
        identity: &str,
        id: i64,
        input: &NoteInput,
    ) -> Result<Note, ClientError> {
        let request = self
            .request(Method::PUT, &format!("/notes/{id}"), identity)
            .json(input);
        decode(send_expecting(request, StatusCode::OK).await?).await
    }

    async fn delete(&self, identity: &str, id: i64) -> Result<(), ClientError> {
        let request = self.request(Method::DELETE, &format!("/notes/{id}"), identity);
        send_expecting(request, StatusCode::NO_CONTENT).await?;
        Ok(())
    }
}
