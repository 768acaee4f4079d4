// --- File: crates/barberbook_common/src/http.rs ---
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::error::{BarberbookError, HttpStatusCode};

pub mod client;

/// Handlers return `Result<_, BarberbookError>` and get the error envelope.
impl IntoResponse for BarberbookError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        tracing::debug!("answering {} with {}", status, self);
        (status, Json(self.envelope())).into_response()
    }
}
