//! Backend entry-point: loads configuration, wires storage and serves the API.

mod server;

use actix_web::web;
use mockable::DefaultEnv;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use bloglist::inbound::http::health::HealthState;
use bloglist::inbound::http::token_config::{BuildMode, token_settings_from_env};
use bloglist::outbound::persistence::{DbPool, PoolConfig, run_migrations};
use server::{ServerConfig, ServerSettings, create_server};

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

    let settings = ServerSettings::load()
        .map_err(|err| std::io::Error::other(format!("failed to load settings: {err}")))?;
    let token_settings =
        token_settings_from_env(&DefaultEnv::new(), BuildMode::from_debug_assertions())
            .map_err(std::io::Error::other)?;
    info!(
        fingerprint = %token_settings.fingerprint(),
        source = ?token_settings.source(),
        "token secret loaded"
    );

    let mut config = ServerConfig::new(settings.bind_addr()?, token_settings)
        .with_token_ttl(settings.token_ttl());
    match settings.database_url() {
        Some(url) => {
            run_migrations(url).await.map_err(std::io::Error::other)?;
            let pool = DbPool::new(PoolConfig::new(url))
                .await
                .map_err(std::io::Error::other)?;
            info!("using PostgreSQL storage");
            config = config.with_db_pool(pool);
        }
        None => warn!("no database configured; using in-memory storage"),
    }

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config)?;
    info!(
        host = settings.host(),
        port = settings.port(),
        "bloglist listening"
    );
    server.await
}
