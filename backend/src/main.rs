//! Repair desk entry-point: loads settings, prepares storage and serves the API.

mod server;

use actix_web::web;
use mockable::DefaultEnv;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use techfix::inbound::http::health::HealthState;
use techfix::inbound::http::session_config::{BuildMode, session_settings_from_env};
use techfix::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};

use server::{AppSettings, ServerConfig, create_server};

fn fatal(context: &str, err: impl std::fmt::Display) -> std::io::Error {
    std::io::Error::other(format!("{context}: {err}"))
}

async fn connect(database_url: &str) -> std::io::Result<DbPool> {
    let url = database_url.to_owned();
    let applied = tokio::task::spawn_blocking(move || run_pending_migrations(&url))
        .await
        .map_err(|err| fatal("migration task", err))?
        .map_err(|err| fatal("run migrations", err))?;
    info!(applied, "database migrations up to date");

    DbPool::new(PoolConfig::new(database_url))
        .await
        .map_err(|err| fatal("build database pool", err))
}

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

    let settings = AppSettings::load().map_err(|err| fatal("load settings", err))?;
    let env = DefaultEnv::new();
    let session = session_settings_from_env(&env, BuildMode::from_debug_assertions())
        .map_err(|err| fatal("session configuration", err))?;
    info!(fingerprint = %session.fingerprint(), "session key loaded");

    let mut config = ServerConfig::new(session, settings.bind_addr()?, settings.site_profile());
    match settings.database_url() {
        Some(url) => config = config.with_db_pool(connect(url).await?),
        None => warn!("TECHFIX_DATABASE_URL not set; using in-memory storage"),
    }

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config, settings.admin_bootstrap()).await?;
    server.await
}
