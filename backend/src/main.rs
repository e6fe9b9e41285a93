//! Newsroom entry-point: loads settings, selects storage, seeds demo data and
//! serves the REST API.

mod server;

use std::sync::Arc;

use actix_web::web;
use color_eyre::eyre::{Context, Result};
use mockable::{DefaultClock, DefaultEnv};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use newsroom::demo_data::{DemoDataSeeder, seed_demo_data_on_startup};
use newsroom::inbound::http::health::HealthState;
use newsroom::inbound::http::token_config::{BuildMode, token_secret_from_env};
use newsroom::outbound::persistence::{DbPool, PoolConfig, run_migrations};
use newsroom::outbound::security::Argon2PasswordHasher;
use server::{Repositories, ServerConfig, ServerSettings, create_server};

/// Application bootstrap.
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

    let settings = ServerSettings::load().wrap_err("failed to load server settings")?;
    let bind_addr = settings.bind_addr()?;
    let visibility = settings.comment_visibility()?;

    let secret = token_secret_from_env(&DefaultEnv::new(), BuildMode::from_debug_assertions())
        .wrap_err("failed to load token secret")?;
    info!(
        source = %secret.source(),
        fingerprint = %secret.fingerprint(),
        "token secret loaded"
    );

    let mut config = ServerConfig::new(bind_addr, secret).with_comment_visibility(visibility);
    if let Some(url) = settings.database_url() {
        run_migrations(url).await?;
        let pool = DbPool::new(PoolConfig::new(url))
            .await
            .wrap_err("failed to build database pool")?;
        config = config.with_db_pool(pool);
    }

    let repositories = Repositories::from_pool(config.db_pool.as_ref());
    info!(
        backend = repositories.backend(),
        %bind_addr,
        public_comments = ?visibility,
        "starting server"
    );

    let seeder = DemoDataSeeder::new(
        repositories.demo_data(),
        Arc::new(Argon2PasswordHasher::default()),
        Arc::new(DefaultClock),
    );
    seed_demo_data_on_startup(settings.seed_demo_data, &seeder).await?;

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config, &repositories)?;
    server.await?;
    Ok(())
}
