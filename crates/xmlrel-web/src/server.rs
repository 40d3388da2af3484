use crate::routes::{file_routes, health_routes, tag_routes};
use crate::{AppState, Result, WebError};
use axum::extract::DefaultBodyLimit;
use axum::Router;
use std::net::SocketAddr;
use xmlrel_config::ServerConfig;

/// Assemble the application router
pub fn build_router(state: AppState, config: &ServerConfig) -> Router {
    Router::new()
        .merge(file_routes())
        .merge(tag_routes())
        .with_state(state)
        .merge(health_routes())
        .layer(DefaultBodyLimit::max(config.max_upload_bytes))
}

/// Serve until ctrl-c
pub async fn start_server(config: &ServerConfig, state: AppState) -> Result<()> {
    let app = build_router(state, config);

    let addr: SocketAddr = config
        .bind_address()
        .parse()
        .map_err(|e| WebError::Config(format!("Invalid address: {e}")))?;

    tracing::info!("Starting xmlrel server on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
