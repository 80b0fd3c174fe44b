pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod observability;

use std::sync::Arc;

use anyhow::Result;
use infrastructure::{axum_http::http_serve, postgres::postgres_connection};
use tracing::info;

pub async fn run() -> Result<()> {
    dotenvy::dotenv().ok();
    observability::init_observability("bss")?;

    let dotenvy_env = config::config_loader::load()?;
    info!("ENV has been loaded");

    let postgres_pool = postgres_connection::establish_connection(
        &dotenvy_env.database.url(),
        dotenvy_env.database.pool_max_size,
    )?;
    info!("Postgres connection has been established");

    http_serve::start(Arc::new(dotenvy_env), Arc::new(postgres_pool)).await?;

    Ok(())
}
