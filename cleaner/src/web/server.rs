// File: cleaner/src/web/server.rs
use crate::web::{handlers, AppState};
use anyhow::Result;
use axum::{
    routing::{get, post},
    Router,
};
use std::future::Future;
use tower_http::trace::TraceLayer;

/// Serve the trigger API until `shutdown` resolves.
pub async fn start_web_server<F>(state: AppState, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = format!("{}:{}", state.config.host, state.config.port);
    let app = create_router(state);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server running on http://{}", addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;
    Ok(())
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(handlers::get_health))
        // === CLEANUP ROUTES ===
        .route("/api/cleanup/run", post(handlers::run_cleanup))
        .route("/api/cleanup/status", get(handlers::get_cleanup_status))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
