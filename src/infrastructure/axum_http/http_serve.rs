use crate::{
    config::config_model::DotEnvyConfig,
    infrastructure::{
        axum_http::{default_routers, routers},
        postgres::postgres_connection::PgPoolSquad,
    },
};
use anyhow::{Context, Result};
use axum::{
    Router,
    http::{Method, header},
    routing::get,
};
use std::{net::SocketAddr, sync::Arc, time::Duration};
use tokio::net::TcpListener;
use tower_http::{
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::info;

/// Plan, subscription and event routes plus health check and fallback,
/// without the server layers.
pub fn api_router(plans: Router, subscriptions: Router, events: Router) -> Router {
    Router::new()
        .merge(plans)
        .merge(subscriptions)
        .merge(events)
        .route("/health-check", get(default_routers::health_check))
        .fallback(default_routers::not_found)
}

pub async fn start(config: Arc<DotEnvyConfig>, db_pool: Arc<PgPoolSquad>) -> Result<()> {
    let app = api_router(
        routers::plans::routes(Arc::clone(&db_pool)),
        routers::subscriptions::routes(Arc::clone(&db_pool)),
        routers::events::routes(Arc::clone(&db_pool)),
    )
    .layer(TimeoutLayer::new(Duration::from_secs(config.server.timeout)))
    .layer(RequestBodyLimitLayer::new(body_limit_bytes(
        config.server.body_limit,
    )?))
    .layer(
        CorsLayer::new()
            .allow_methods([Method::GET, Method::POST, Method::PUT])
            .allow_headers([header::CONTENT_TYPE])
            .allow_origin(Any),
    )
    .layer(TraceLayer::new_for_http());

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    let listener = TcpListener::bind(addr).await?;

    info!(port = config.server.port, "Server is running");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

fn body_limit_bytes(body_limit_mib: u64) -> Result<usize> {
    let bytes = body_limit_mib
        .checked_mul(1024 * 1024)
        .with_context(|| format!("SERVER_BODY_LIMIT of {body_limit_mib} MiB is too large"))?;

    usize::try_from(bytes)
        .with_context(|| format!("SERVER_BODY_LIMIT of {body_limit_mib} MiB is too large"))
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install CTRL+C signal handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received ctrl+C signal"),
        _ = terminate => info!("Received terminate signal"),
    }
}
