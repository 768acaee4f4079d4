use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use barberbook_backend::{app_state::AppState, build_app, WELCOME};
use barberbook_common::services::mock::{MockNotificationService, MockServiceFactory};
use barberbook_config::{AppConfig, BookingConfig, ServerConfig};
use serde_json::{json, Value};
use tower::ServiceExt;

fn config(booking: BookingConfig) -> Arc<AppConfig> {
    Arc::new(AppConfig {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
        },
        use_resend: true,
        booking,
        resend: None,
    })
}

fn owner_booking() -> BookingConfig {
    BookingConfig {
        barber_email: Some("owner@example.com".to_string()),
        ..Default::default()
    }
}

fn app_with(booking: BookingConfig, notifier: Option<Arc<MockNotificationService>>) -> Router {
    let services = MockServiceFactory {
        notification: notifier.map(|n| n as _),
    };
    let state = AppState::with_service_factory(config(booking), Arc::new(services));
    build_app(&state).unwrap()
}

async fn body_text(response: axum::response::Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8_lossy(&bytes).into_owned()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn booking_body() -> String {
    json!({
        "service": {"key": "skin_fade", "name": "Skin fade", "price": 28, "mins": 50},
        "barber": {"key": "oliver", "name": "Oliver"},
        "date": "2026-10-20",
        "time": "10:00",
        "endTime": "10:50",
        "phone": "07700 900 123"
    })
    .to_string()
}

#[tokio::test]
async fn api_root_and_health() {
    let app = app_with(owner_booking(), None);

    let response = app.clone().oneshot(get("/api")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await, WELCOME);

    let response = app.oneshot(get("/api/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await, "ok");
}

#[tokio::test]
async fn booking_routes_live_under_api() {
    let app = app_with(owner_booking(), None);

    let response = app.clone().oneshot(get("/api/booking/catalog")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json: Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(json["barbers"].as_array().map(Vec::len), Some(3));

    let response = app.oneshot(get("/booking/catalog")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn relay_through_the_full_app() {
    let notifier = Arc::new(MockNotificationService::new());
    let app = app_with(owner_booking(), Some(notifier.clone()));

    let request = Request::builder()
        .method("POST")
        .uri("/api/booking")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(booking_body()))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json: Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(json, json!({"ok": true}));

    let sent = notifier.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, "owner@example.com");
    assert!(sent[0].subject.starts_with("Neo Gentleman · New lead · Skin fade"));
}

#[tokio::test]
async fn missing_owner_address_is_reported() {
    let notifier = Arc::new(MockNotificationService::new());
    let app = app_with(BookingConfig::default(), Some(notifier.clone()));

    let request = Request::builder()
        .method("POST")
        .uri("/api/booking")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(booking_body()))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json: Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(json["error"], "Missing BOOKING_BARBER_EMAIL");
    assert!(notifier.sent().is_empty());
}

#[tokio::test]
async fn cors_allows_any_origin_by_default() {
    let app = app_with(owner_booking(), None);
    let request = Request::builder()
        .method("OPTIONS")
        .uri("/api/booking")
        .header(header::ORIGIN, "https://neo-gentleman.example")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "*"
    );
}

#[tokio::test]
async fn cors_restricts_to_configured_origins() {
    let booking = BookingConfig {
        allowed_origins: vec!["https://neo-gentleman.example".to_string()],
        ..owner_booking()
    };
    let app = app_with(booking, None);

    let allowed = Request::builder()
        .uri("/api/health")
        .header(header::ORIGIN, "https://neo-gentleman.example")
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(allowed).await.unwrap();
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "https://neo-gentleman.example"
    );

    let other = Request::builder()
        .uri("/api/health")
        .header(header::ORIGIN, "https://elsewhere.example")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(other).await.unwrap();
    assert!(response
        .headers()
        .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
        .is_none());
}

#[test]
fn unusable_booking_config_fails_at_build() {
    let booking = BookingConfig {
        time_zone: Some("Mars/Olympus_Mons".to_string()),
        ..owner_booking()
    };
    let state = AppState::with_service_factory(
        config(booking),
        Arc::new(MockServiceFactory { notification: None }),
    );
    assert!(build_app(&state).is_err());

    let booking = BookingConfig {
        open_time: Some("20:00".to_string()),
        close_time: Some("10:00".to_string()),
        ..owner_booking()
    };
    let state = AppState::with_service_factory(
        config(booking),
        Arc::new(MockServiceFactory { notification: None }),
    );
    assert!(build_app(&state).is_err());
}
