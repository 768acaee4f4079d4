use std::sync::Arc;
use std::time::Duration;

use axum::{http::StatusCode, routing::post, Json, Router};
use barberbook_booking::draft::BookingDraft;
use barberbook_booking::slots::OpeningHours;
use barberbook_booking::submit::{BookingClient, SubmitOutcome};
use barberbook_common::services::mock::MockNotificationService;
use serde_json::{json, Value};

use fixtures::*;

fn stub(status: StatusCode, body: Value, delay: Duration) -> Router {
    Router::new().route(
        "/api/booking",
        post(move || {
            let body = body.clone();
            async move {
                tokio::time::sleep(delay).await;
                (status, Json(body))
            }
        }),
    )
}

#[tokio::test]
async fn accepted_lead_is_sent() {
    let base = spawn_server(stub(StatusCode::OK, json!({"ok": true}), Duration::ZERO)).await;
    let client = BookingClient::new(format!("{base}/api/booking"));
    assert_eq!(client.submit(&valid_request()).await, SubmitOutcome::Sent);
    assert!(!client.is_busy());
}

#[tokio::test]
async fn relay_failure_falls_back_to_demo_success() {
    let base = spawn_server(stub(
        StatusCode::BAD_GATEWAY,
        json!({"ok": false, "error": "Resend error 403: Forbidden"}),
        Duration::ZERO,
    ))
    .await;
    let client = BookingClient::new(format!("{base}/api/booking"));
    let outcome = client.submit(&valid_request()).await;
    assert_eq!(
        outcome,
        SubmitOutcome::DemoSuccess {
            reason: "Resend error 403: Forbidden".to_string()
        }
    );
    assert!(outcome.is_success());
}

#[tokio::test]
async fn unreachable_relay_falls_back_to_demo_success() {
    // grab a free port, then close it
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = BookingClient::new(format!("http://{addr}/api/booking"));
    let outcome = client.submit(&valid_request()).await;
    assert!(matches!(outcome, SubmitOutcome::DemoSuccess { .. }));
}

#[tokio::test]
async fn second_submit_while_in_flight_is_busy() {
    let base = spawn_server(stub(
        StatusCode::OK,
        json!({"ok": true}),
        Duration::from_millis(200),
    ))
    .await;
    let client = Arc::new(BookingClient::new(format!("{base}/api/booking")));
    let request = valid_request();

    let (first, second) = tokio::join!(client.submit(&request), client.submit(&request));
    assert_eq!(first, SubmitOutcome::Sent);
    assert_eq!(second, SubmitOutcome::Busy);

    // the flag is released afterwards
    assert_eq!(client.submit(&request).await, SubmitOutcome::Sent);
}

#[tokio::test]
async fn draft_goes_all_the_way_to_the_owner() {
    let notifier = Arc::new(MockNotificationService::new());
    let app = Router::new().nest("/api", test_router(Some(notifier.clone())));
    let base = spawn_server(app).await;
    let client = BookingClient::new(format!("{base}/api/booking"));

    let hours = OpeningHours::default();
    let mut draft = BookingDraft::new(monday_morning().date());
    draft.pick_barber("theo").unwrap();
    draft.pick_service("hot_towel_shave").unwrap();
    assert!(draft.advance());
    assert!(draft.advance());
    draft.pick_time("10:30", &hours, monday_morning()).unwrap();
    draft.set_phone("07700900123");
    draft.add_note_chip("Sensitive skin");

    let outcome = client.submit_draft(&mut draft).await.unwrap();
    assert_eq!(outcome, SubmitOutcome::Sent);
    assert!(draft.is_sent());
    assert!(!draft.is_sending());

    let sent = notifier.sent();
    assert_eq!(sent.len(), 1);
    assert!(sent[0].subject.contains("Hot towel shave · 2026-10-19 10:30"));
    assert!(sent[0].body.contains("10:30–11:00"));
    assert!(sent[0].body.contains("Sensitive skin"));
}
