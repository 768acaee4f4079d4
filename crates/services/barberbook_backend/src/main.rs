// File: services/barberbook_backend/src/main.rs
use std::sync::Arc;

use axum::Router;
use barberbook_backend::{app_state::AppState, build_app};
use barberbook_common::{logging, BarberbookError, Context};
use barberbook_config::load_config;
use tokio::net::TcpListener;
use tower_http::services::ServeDir;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    let _guard = logging::init();

    if let Err(e) = run().await {
        logging::log_error(&e, "Barberbook backend stopped");
        std::process::exit(1);
    }
    info!("Server shutdown complete");
}

async fn run() -> Result<(), BarberbookError> {
    let config = Arc::new(load_config().context("loading config")?);

    let state = AppState::new(config.clone());
    let mut app = build_app(&state)?;

    // Serve the static site in dev mode
    if cfg!(debug_assertions) {
        info!("Running in development mode, serving static files from ../../dist");
        let static_router = Router::new().nest_service("/static", ServeDir::new("../../dist"));
        app = app
            .merge(static_router)
            .fallback_service(ServeDir::new("../../dist"));
    }

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    info!("Starting server at http://{}", addr);
    info!("API endpoints available at http://{}/api", addr);

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serving")
}

/// Resolves on Ctrl+C, or SIGTERM on unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("failed to listen for Ctrl+C: {}", e);
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
                error!("failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, shutting down"),
        _ = terminate => info!("Received SIGTERM, shutting down"),
    }
}
