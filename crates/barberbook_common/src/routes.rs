// --- File: crates/barberbook_common/src/routes.rs ---
use axum::{routing::get, Router};

/// Routes shared by every deployment; currently the liveness probe.
pub fn routes() -> Router {
    Router::new().route("/health", get(|| async { "ok" }))
}
