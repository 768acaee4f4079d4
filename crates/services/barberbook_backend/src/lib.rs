// File: crates/services/barberbook_backend/src/lib.rs
//! Assembles the Barberbook HTTP application.

pub mod app_state;
pub mod service_factory;

use axum::{routing::get, Router};
use barberbook_booking::logic::BookingError;
use http::{header, HeaderValue, Method};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::app_state::AppState;

pub const WELCOME: &str = "Welcome to the Barberbook API!";

/// CORS for the booking widget: any origin when `allowed_origins` is empty.
pub fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    if allowed_origins.is_empty() {
        return layer.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match origin.trim().parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(e) => {
                warn!("ignoring allowed origin {:?}: {}", origin, e);
                None
            }
        })
        .collect();
    layer.allow_origin(AllowOrigin::list(origins))
}

/// The `/api` routes, the optional Swagger UI, CORS and request tracing.
///
/// Fails when the booking section of the config cannot be used.
pub fn build_app(state: &AppState) -> Result<Router, BookingError> {
    let booking_router =
        barberbook_booking::routes(state.config.clone(), state.service_factory.clone())?;

    let api_router = Router::new()
        .route("/", get(|| async { WELCOME }))
        .merge(barberbook_common::routes())
        .merge(booking_router);

    #[allow(unused_mut)] // mutated only with the openapi feature
    let mut app = Router::new().nest("/api", api_router);

    #[cfg(feature = "openapi")]
    {
        use barberbook_booking::doc::BookingApiDoc;
        use utoipa::OpenApi;
        use utoipa_swagger_ui::SwaggerUi;

        #[derive(OpenApi)]
        #[openapi(
            info(
                title = "Barberbook API",
                version = "0.1.0",
                description = "Booking widget backend: catalog, availability and lead relay",
                license(name = "MIT", url = "https://opensource.org/licenses/MIT")
            ),
            tags( (name = "Barberbook", description = "Core service endpoints")),
            servers( (url = "/api", description = "Main API Prefix")),
        )]
        struct ApiDoc;

        let mut openapi_doc = ApiDoc::openapi();
        openapi_doc.merge(BookingApiDoc::openapi());
        info!("Adding Swagger UI at /api/docs");

        let swagger_ui = SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", openapi_doc);
        app = app.merge(swagger_ui);
    }

    info!(
        "booking routes ready for {} ({})",
        state.config.booking.shop_name(),
        state.config.booking.time_zone()
    );

    Ok(app
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                tracing::info_span!(
                    "http_request",
                    method = %request.method(),
                    uri = %request.uri(),
                )
            }),
        )
        .layer(cors_layer(&state.config.booking.allowed_origins)))
}
