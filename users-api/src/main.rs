//! Service entry-point: wires the user endpoints, health probes, and OpenAPI
//! docs.

mod server;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

use server::{ServerConfig, Settings};
use users_api::inbound::http::health::HealthState;
use users_api::outbound::persistence::{DbPool, PoolConfig};

/// Install the JSON log subscriber, honouring `RUST_LOG`.
fn init_tracing() {
    let result = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init();
    if let Err(error) = result {
        warn!(%error, "could not install the tracing subscriber");
    }
}

async fn build_pool(settings: &Settings, database_url: &str) -> std::io::Result<DbPool> {
    let mut pool_config = PoolConfig::new(database_url);
    if let Some(max_connections) = settings.db_max_connections {
        pool_config = pool_config.with_max_connections(max_connections);
    }
    DbPool::new(pool_config)
        .await
        .map_err(|error| std::io::Error::other(format!("create database pool: {error}")))
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    init_tracing();

    let settings = Settings::load()
        .map_err(|error| std::io::Error::other(format!("load configuration: {error}")))?;
    let bind_addr = settings
        .bind_addr()
        .map_err(|error| std::io::Error::other(format!("invalid bind address: {error}")))?;

    let mut config = ServerConfig::new(bind_addr);
    if let Some(database_url) = settings.database_url() {
        config = config.with_db_pool(build_pool(&settings, database_url).await?);
    } else {
        warn!("USERS_API_DATABASE_URL not set; user records are stored in memory");
    }

    let health_state = web::Data::new(HealthState::new());
    let server = server::create_server(health_state, config)?;
    server.await
}
