pub mod auth;
pub mod axum_http;
pub mod config;
pub mod usecases;

use std::sync::Arc;

use anyhow::Result;
use payment_core::infra::db::postgres::{migrations, postgres_connection};
use tracing::info;

pub async fn run() -> Result<()> {
    dotenvy::dotenv().ok();
    payment_core::observability::init_observability("backend")?;

    let dotenvy_env = config::config_loader::load()?;
    info!("ENV has been loaded");

    let postgres_pool = postgres_connection::establish_connection(
        &dotenvy_env.database.url,
        dotenvy_env.database.max_connections,
    )?;
    info!(
        max_connections = dotenvy_env.database.max_connections,
        "Postgres connection has been established"
    );

    if dotenvy_env.database.run_migrations {
        migrations::run_pending_migrations(&postgres_pool)?;
    } else {
        info!("Skipping database migrations");
    }

    axum_http::http_serve::start(Arc::new(dotenvy_env), Arc::new(postgres_pool)).await?;

    Ok(())
}
