//! HTTP server assembly
//!
//! Mounts the feature routers under `/api/v1`, adds the service endpoints
//! (`/`, `/health`) and wraps everything in the middleware stack.

pub mod response;

use axum::{extract::State, response::IntoResponse, routing::get, Json, Router};
use serde_json::json;
use sqlx::PgPool;
use std::{net::SocketAddr, time::Duration};
use tokio::signal;
use tower_http::compression::CompressionLayer;

use crate::config::Config;
use crate::error::AppResult;
use crate::features::{self, FeatureState};
use crate::{db, middleware};

use self::response::ApiResponse;

/// Serve the API until Ctrl+C or SIGTERM
pub async fn serve(config: Config, pool: PgPool) -> anyhow::Result<()> {
    let app = create_router(FeatureState::new(pool), &config);

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(config.server.shutdown_timeout_secs))
        .await?;

    tracing::info!("Server shut down gracefully");
    Ok(())
}

/// Create the application router with all routes and middleware
pub fn create_router(state: FeatureState, config: &Config) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .with_state(state.clone())
        .nest("/api/v1", features::router(state))
        // Apply layers from innermost to outermost
        .layer(CompressionLayer::new())
        .layer(middleware::tracing_layer())
        .layer(middleware::cors_layer(&config.cors))
}

async fn root() -> impl IntoResponse {
    Json(json!({
        "name": "Talent Management API",
        "version": env!("CARGO_PKG_VERSION"),
        "status": "running"
    }))
}

/// Reports 503 when the database cannot be reached
async fn health(State(state): State<FeatureState>) -> AppResult<ApiResponse<serde_json::Value>> {
    db::health_check(&state.db).await.map_err(|e| {
        tracing::error!("Database health check failed: {}", e);
        crate::error::AppError::Unavailable("database unreachable".to_string())
    })?;

    Ok(ApiResponse::success(json!({
        "status": "healthy",
        "database": "connected"
    })))
}

async fn shutdown_signal(timeout_secs: u64) {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            },
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, starting graceful shutdown");
        },
        _ = terminate => {
            tracing::info!("Received terminate signal, starting graceful shutdown");
        },
    }

    // Give ongoing requests time to complete
    tracing::info!("Waiting up to {} seconds for connections to close", timeout_secs);
    tokio::time::sleep(Duration::from_secs(timeout_secs.min(5))).await;
}
