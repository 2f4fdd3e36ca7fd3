//! Backend entry-point: loads settings, prepares the note store, and serves
//! the notes API with health probes and OpenAPI docs.

mod server;

use std::ffi::OsString;
use std::sync::Arc;

use actix_web::web;
#[cfg(feature = "metrics")]
use actix_web_prom::PrometheusMetrics;
use mockable::DefaultEnv;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use notes_backend::domain::ports::NoteRepository;
use notes_backend::example_data::{ExampleDataSettings, seed_example_data_on_startup};
use notes_backend::inbound::http::health::HealthState;
use notes_backend::outbound::persistence::{DbPool, run_pending_migrations};
use notes_backend::settings::ServerSettings;

use server::{ServerConfig, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = load_settings::<ServerSettings>()?;
    let bind_addr = settings.bind_addr().map_err(std::io::Error::other)?;
    let mut config =
        ServerConfig::new(bind_addr).with_cors_origins(settings.cors_origins());

    match settings.database_url(&DefaultEnv::new()) {
        Some(database_url) => {
            run_pending_migrations(&database_url)
                .await
                .map_err(std::io::Error::other)?;
            let pool = DbPool::new(settings.pool_config(database_url))
                .await
                .map_err(std::io::Error::other)?;
            config = config.with_db_pool(pool);
        }
        None => warn!("no database URL configured; notes are kept in memory only"),
    }

    seed_example_data(config.repository()).await?;

    #[cfg(feature = "metrics")]
    let config = config.with_metrics(initialize_metrics(server::build_prometheus));

    let health_state = web::Data::new(HealthState::new());
    info!(bind_addr = %config.bind_addr(), "starting notes server");
    let server = create_server(health_state.clone(), config)?;
    let result = server.await;
    health_state.mark_unhealthy();
    result
}

fn load_settings<T: OrthoConfig>() -> std::io::Result<T> {
    T::load_from_iter([OsString::from("notes-backend")])
        .map_err(|err| std::io::Error::other(format!("failed to load settings: {err}")))
}

async fn seed_example_data(repository: Arc<dyn NoteRepository>) -> std::io::Result<()> {
    let settings = load_settings::<ExampleDataSettings>()?;
    seed_example_data_on_startup(&settings, repository.as_ref())
        .await
        .map_err(std::io::Error::other)?;
    Ok(())
}

/// Build Prometheus middleware, logging and continuing without it on failure.
#[cfg(feature = "metrics")]
fn initialize_metrics<E, F>(build: F) -> Option<PrometheusMetrics>
where
    E: std::fmt::Display,
    F: FnOnce() -> Result<PrometheusMetrics, E>,
{
    match build() {
        Ok(metrics) => Some(metrics),
        Err(error) => {
            warn!(%error, "Prometheus metrics disabled");
            None
        }
    }
}
