//! Axum server setup
//!
//! Startup order: open the database (best effort), build the router, bind,
//! serve until Ctrl+C or SIGTERM.

use std::path::Path;
use std::sync::Arc;

use axum::{routing::get, Router};
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use super::routes;
use super::AppState;
use crate::config::{CorsPolicy, ServerConfig};
use crate::db::{self, Store};

/// Plain-text answer for `/` when no frontend bundle is served
const API_BANNER: &str = "API is running. Use /api/contacts or /api/todos";

/// Build the application router.
///
/// API routes live under `/api`. With a static directory configured, any
/// other path is served from it, falling back to `index.html`.
pub fn build_router(state: AppState, config: &ServerConfig) -> Router {
    let mut app = Router::new().nest("/api", routes::api_router());

    app = match &config.static_dir {
        Some(dir) => app.fallback_service(spa_service(dir)),
        None => app.route("/", get(|| async { API_BANNER })),
    };

    // No request timeout: a slow statement holds its request open
    let mut app = app.layer(TraceLayer::new_for_http());

    if let CorsPolicy::Origin(origin) = &config.cors {
        app = app.layer(
            CorsLayer::new()
                .allow_origin(origin.clone())
                .allow_methods(Any)
                .allow_headers(Any),
        );
    }

    app.with_state(Arc::new(state))
}

/// Static bundle with SPA fallback to `index.html`
fn spa_service(dir: &Path) -> ServeDir<ServeFile> {
    ServeDir::new(dir).fallback(ServeFile::new(dir.join("index.html")))
}

/// Run the HTTP server.
///
/// # Example
///
/// ```ignore
/// let config = ServerConfig::default();
/// run_server(config).await?;
/// ```
pub async fn run_server(config: ServerConfig) -> crate::Result<()> {
    let store = db::open(
        config.database_url.as_deref(),
        config.schema.clone(),
        &config.env,
    )
    .await
    .map(|db| Arc::new(db) as Arc<dyn Store>);

    let state = AppState::new(store, config.env.clone());

    match &config.cors {
        CorsPolicy::Origin(origin) => tracing::info!(?origin, "CORS: single origin allowed"),
        CorsPolicy::Disabled => tracing::info!("CORS: disabled"),
    }
    if let Some(dir) = &config.static_dir {
        tracing::info!(dir = %dir.display(), "Serving static frontend");
    }

    let app = build_router(state, &config);

    // Bind listener
    let listener = TcpListener::bind(config.bind_addr).await?;
    tracing::info!(env = %config.env, "Server running on http://{}", config.bind_addr);

    // Run with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, starting shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, starting shutdown");
        }
    }
}
