//! Backend entry-point: loads configuration, prepares persistence and serves
//! the registry API.

mod server;

use std::time::Duration;

use actix_web::web;
use color_eyre::eyre::WrapErr;
use mockable::DefaultEnv;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use exam_registry::inbound::http::health::HealthState;
use exam_registry::inbound::http::session_config::{BuildMode, session_settings_from_env};
use exam_registry::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use server::{ServerConfig, ServerSettings, create_server};

const POOL_CONNECTION_TIMEOUT: Duration = Duration::from_secs(30);

async fn connect(settings: &ServerSettings, database_url: &str) -> color_eyre::Result<DbPool> {
    if settings.run_migrations() {
        run_pending_migrations(database_url)
            .await
            .wrap_err("database migrations failed")?;
    }
    let config = PoolConfig::new(database_url)
        .with_max_size(settings.pool_max_size())
        .with_min_idle(settings.pool_min_idle)
        .with_connection_timeout(POOL_CONNECTION_TIMEOUT);
    let pool = DbPool::new(config)
        .await
        .wrap_err("failed to build the database pool")?;
    info!(max_size = settings.pool_max_size(), "database pool ready");
    Ok(pool)
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = ServerSettings::load().wrap_err("failed to load server settings")?;
    let session = session_settings_from_env(&DefaultEnv::new(), BuildMode::from_debug_assertions())
        .wrap_err("invalid session configuration")?;

    let mut config = ServerConfig::new(
        session.key,
        session.cookie_secure,
        session.same_site,
        settings.bind_addr(),
    );
    if let Some(database_url) = settings.database_url() {
        config = config.with_db_pool(connect(&settings, database_url).await?);
    }

    let health_state = web::Data::new(HealthState::new());
    info!(bind_addr = %settings.bind_addr(), "starting server");
    let server = create_server(health_state.clone(), config)?;
    let result = server.await;
    health_state.mark_unhealthy();
    result.wrap_err("server terminated with an error")
}
