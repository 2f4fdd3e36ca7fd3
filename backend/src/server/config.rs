//! HTTP server configuration object and helpers.

use std::net::SocketAddr;
use std::sync::Arc;

use notes_backend::domain::ports::NoteRepository;
use notes_backend::outbound::memory::InMemoryNoteRepository;
use notes_backend::outbound::persistence::{DbPool, DieselNoteRepository};

#[cfg(feature = "metrics")]
use actix_web_prom::PrometheusMetrics;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) repository: Arc<dyn NoteRepository>,
    pub(crate) cors_origins: Vec<String>,
    #[cfg(feature = "metrics")]
    pub(crate) prometheus: Option<PrometheusMetrics>,
}

impl ServerConfig {
    /// Construct a configuration backed by the in-memory note store.
    #[must_use]
    pub fn new(bind_addr: SocketAddr) -> Self {
        Self {
            bind_addr,
            repository: Arc::new(InMemoryNoteRepository::default()),
            cors_origins: Vec::new(),
            #[cfg(feature = "metrics")]
            prometheus: None,
        }
    }

    /// Persist notes in PostgreSQL through the given pool.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.repository = Arc::new(DieselNoteRepository::new(pool));
        self
    }

    /// Allow cross-origin calls from these origins.
    #[must_use]
    pub fn with_cors_origins(mut self, origins: Vec<String>) -> Self {
        self.cors_origins = origins;
        self
    }

    /// Note store shared by the server and startup seeding.
    #[must_use]
    pub fn repository(&self) -> Arc<dyn NoteRepository> {
        Arc::clone(&self.repository)
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }

    #[cfg(feature = "metrics")]
    /// Attach Prometheus middleware to the configuration.
    #[must_use]
    pub fn with_metrics(mut self, prometheus: Option<PrometheusMetrics>) -> Self {
        self.prometheus = prometheus;
        self
    }
}
