use std::{path::Path, sync::Arc};

use axum::Router;
use configs::{AppConfig, ServerConfig};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::errors::StartupError;
use crate::routes::{self, ServerState};
use service::{apps::AppsService, runtime, storage::FileTranslationRepository};

/// Any origin, method and header (`Access-Control-Allow-Origin: *`).
pub fn build_cors() -> CorsLayer {
    CorsLayer::permissive()
}

/// Bind `host:port`; hostnames such as `localhost` are resolved.
async fn bind_listener(server: &ServerConfig) -> Result<TcpListener, StartupError> {
    let addr = server.bind_addr();
    TcpListener::bind(&addr)
        .await
        .map_err(|e| StartupError::InvalidConfig(format!("cannot bind {addr}: {e}")))
}

/// Wire the storage handle into the service and build the router.
pub fn build_app(translations_dir: &Path) -> Router {
    let repo = FileTranslationRepository::new(translations_dir);
    let state = ServerState { apps: AppsService::new(Arc::new(repo)) };
    routes::build_router(state, build_cors())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!(event = "shutdown_signal", "received Ctrl+C, draining connections");
    }
}

/// Public entry: build the app and run the HTTP server until Ctrl+C.
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    let translations_dir = cfg.storage.translations_path();
    runtime::ensure_env(&translations_dir)
        .await
        .map_err(|e| StartupError::Runtime(e.to_string()))?;

    let app = build_app(&translations_dir);

    let listener = bind_listener(&cfg.server).await?;
    let addr = listener.local_addr()?;
    info!(%addr, translations_dir = %translations_dir.display(), "starting translation store");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}
