// --- File: crates/barberbook_booking/src/routes.rs ---

use crate::handlers::{
    get_calendar_handler, get_catalog_handler, get_slots_handler, submit_booking_handler,
    BookingState,
};
use crate::logic::BookingError;
use axum::{
    routing::{get, post},
    Router,
};
use barberbook_common::services::ServiceFactory;
use barberbook_config::AppConfig;
use std::sync::Arc;

/// Creates a router containing all routes for the booking feature.
///
/// Fails when the opening window or time zone in config cannot be used.
pub fn routes(
    config: Arc<AppConfig>,
    services: Arc<dyn ServiceFactory>,
) -> Result<Router, BookingError> {
    let state = BookingState::new(config, services)?;
    Ok(router(Arc::new(state)))
}

/// Same routes over an already built state.
pub fn router(state: Arc<BookingState>) -> Router {
    Router::new()
        .route("/booking", post(submit_booking_handler))
        .route("/booking/catalog", get(get_catalog_handler))
        .route("/booking/slots", get(get_slots_handler))
        .route("/booking/calendar", get(get_calendar_handler))
        .with_state(state)
}
