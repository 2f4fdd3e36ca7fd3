//! Server configuration loaded via OrthoConfig.
//!
//! Values come from `NOTES_*` environment variables. The database URL also
//! honours the conventional `DATABASE_URL` when `NOTES_DATABASE_URL` is unset.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use mockable::Env;
use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::outbound::persistence::PoolConfig;

const DEFAULT_PORT: u16 = 5000;
const DEFAULT_HOST: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);
const DATABASE_URL_FALLBACK_ENV: &str = "DATABASE_URL";

/// Errors raised while interpreting server settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// `NOTES_HOST` is not an IP address.
    #[error("invalid NOTES_HOST '{value}': {source}")]
    InvalidHost {
        /// Rejected value.
        value: String,
        /// Parse failure.
        #[source]
        source: std::net::AddrParseError,
    },
}

/// Settings for the HTTP server and its store.
#[derive(Debug, Clone, Default, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "NOTES")]
pub struct ServerSettings {
    /// Interface to bind; defaults to all interfaces.
    pub host: Option<String>,
    /// Port to bind; defaults to 5000.
    pub port: Option<u16>,
    /// PostgreSQL URL. Without one the server keeps notes in memory.
    pub database_url: Option<String>,
    /// Comma-separated list of origins allowed to call the API cross-origin.
    pub cors_origins: Option<String>,
    /// Upper bound on pooled database connections.
    pub pool_max_size: Option<u32>,
}

impl ServerSettings {
    /// Socket address to bind.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let host = match self.host.as_deref().map(str::trim) {
            None | Some("") => DEFAULT_HOST,
            Some(raw) => raw.parse().map_err(|source| SettingsError::InvalidHost {
                value: raw.to_owned(),
                source,
            })?,
        };
        Ok(SocketAddr::new(host, self.port.unwrap_or(DEFAULT_PORT)))
    }

    /// Database URL from settings, falling back to `DATABASE_URL` in `env`.
    ///
    /// Blank values count as unset.
    pub fn database_url<E: Env>(&self, env: &E) -> Option<String> {
        self.database_url
            .clone()
            .or_else(|| env.string(DATABASE_URL_FALLBACK_ENV))
            .map(|url| url.trim().to_owned())
            .filter(|url| !url.is_empty())
    }

    /// Pool configuration for `database_url` honouring `pool_max_size`.
    pub fn pool_config(&self, database_url: impl Into<String>) -> PoolConfig {
        let config = PoolConfig::new(database_url);
        match self.pool_max_size {
            Some(max_size) if max_size > 0 => config.with_max_size(max_size),
            _ => config,
        }
    }

    /// Allowed CORS origins; empty when CORS is disabled.
    pub fn cors_origins(&self) -> Vec<String> {
        self.cors_origins
            .as_deref()
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|origin| !origin.is_empty())
                    .map(str::to_owned)
                    .collect()
            })
            .unwrap_or_default()
    }
}
