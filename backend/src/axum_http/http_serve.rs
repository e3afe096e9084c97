use std::{net::SocketAddr, sync::Arc, time::Duration};

use anyhow::{Context, Result};
use axum::{
    Extension, Router,
    http::{
        Method,
        header::{AUTHORIZATION, CONTENT_TYPE},
    },
    routing::get,
};
use payment_core::infra::db::postgres::postgres_connection::PgPoolSquad;
use tokio::net::TcpListener;
use tower_http::{
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::{error, info};

use crate::{
    axum_http::{default_routers, routers},
    config::config_model::DotEnvyConfig,
};

pub fn app(config: &DotEnvyConfig, db_pool: Arc<PgPoolSquad>) -> Result<Router> {
    let app = Router::new()
        .fallback(default_routers::not_found)
        .nest(
            "/api/v1/payment-methods",
            routers::payment_methods::routes(Arc::clone(&db_pool)),
        )
        .nest(
            "/api/v1/payment-method-configs",
            routers::payment_method_configs::routes(Arc::clone(&db_pool)),
        )
        .nest(
            "/api/v1/payment-gateways",
            routers::payment_gateways::routes(Arc::clone(&db_pool)),
        )
        .route("/api/v1/health-check", get(default_routers::health_check))
        .layer(Extension(Arc::new(config.admin.clone())))
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.backend_server.timeout,
        )))
        .layer(RequestBodyLimitLayer::new(body_limit_bytes(
            config.backend_server.body_limit,
        )?))
        .layer(
            CorsLayer::new()
                .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
                .allow_headers([AUTHORIZATION, CONTENT_TYPE])
                .allow_origin(Any),
        )
        .layer(TraceLayer::new_for_http());

    Ok(app)
}

/// `SERVER_BODY_LIMIT` is given in MiB.
fn body_limit_bytes(mebibytes: u64) -> Result<usize> {
    let bytes = mebibytes
        .checked_mul(1024 * 1024)
        .context("SERVER_BODY_LIMIT is too large")?;
    usize::try_from(bytes).context("SERVER_BODY_LIMIT is too large")
}

pub async fn start(config: Arc<DotEnvyConfig>, db_pool: Arc<PgPoolSquad>) -> Result<()> {
    let app = app(&config, db_pool)?;

    let addr = SocketAddr::from(([0, 0, 0, 0], config.backend_server.port));
    let listener = TcpListener::bind(addr).await?;

    info!("Server is running on port {}", config.backend_server.port);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            error!(error = %err, "Failed to install CTRL+C signal handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                error!(error = %err, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received ctrl+C signal"),
        _ = terminate => info!("Received terminate signal"),
    }
}
