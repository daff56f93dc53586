//! Backend entry-point: configuration, migrations, and server bootstrap.

use actix_web::web;
use color_eyre::eyre::{Context, Result, eyre};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use citas_backend::inbound::http::health::HealthState;
use citas_backend::outbound::persistence::{DbPool, PoolConfig, migrations};
use citas_backend::server::{AppSettings, ServerConfig, create_server};
use ortho_config::OrthoConfig;

#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load().wrap_err("failed to load configuration")?;
    let database_url = settings
        .database_url
        .clone()
        .ok_or_else(|| eyre!("CITAS_DATABASE_URL is not set"))?;
    let bind_addr = settings.bind_addr().wrap_err("invalid CITAS_BIND_ADDR")?;

    migrations::run_pending_migrations(&database_url)
        .await
        .wrap_err("failed to apply database migrations")?;
    let pool = DbPool::new(PoolConfig::new(database_url))
        .await
        .wrap_err("failed to build connection pool")?;

    let health_state = web::Data::new(HealthState::new());
    let config = ServerConfig::new(bind_addr).with_db_pool(pool);
    let server = create_server(health_state, config)?;
    info!(%bind_addr, "server listening");
    server.await.wrap_err("server terminated with an error")
}
