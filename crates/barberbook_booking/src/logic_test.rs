// --- File: crates/barberbook_booking/src/logic_test.rs ---
#[cfg(test)]
mod tests {
    use crate::logic::*;
    use barberbook_common::error::{BarberbookError, HttpStatusCode};
    use barberbook_common::services::mock::MockNotificationService;

    fn sample_request() -> BookingRequest {
        BookingRequest {
            service: Some(ServiceSelection {
                key: Some("skin_fade".to_string()),
                name: "Skin fade".to_string(),
                price: Some(Amount::Number(28.0)),
                mins: Some(Amount::Number(50.0)),
            }),
            barber: Some(BarberSelection {
                key: Some("oliver".to_string()),
                name: "Oliver".to_string(),
            }),
            date: "2026-10-20".to_string(),
            time: "10:00".to_string(),
            end_time: Some("10:50".to_string()),
            phone: "07700 900 123".to_string(),
            name: Some("Sam".to_string()),
            notes: Some("Beard trim".to_string()),
            email: Some("sam@example.com".to_string()),
        }
    }

    #[test]
    fn payload_uses_camel_case_end_time() {
        let json = serde_json::json!({
            "service": {"key": "skin_fade", "name": "Skin fade", "price": 28, "mins": 50},
            "barber": {"key": "oliver", "name": "Oliver"},
            "date": "2026-10-20", "time": "10:00", "endTime": "10:50",
            "phone": "07700 900 123", "name": "Sam", "notes": "Beard trim",
            "email": "sam@example.com"
        });
        let parsed: BookingRequest = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, sample_request());

        let back = serde_json::to_value(&parsed).unwrap();
        assert_eq!(back["endTime"], "10:50");
    }

    #[test]
    fn validation_requires_core_fields() {
        assert!(validate_request(&sample_request()).is_ok());

        let mut no_service = sample_request();
        no_service.service = None;
        assert!(matches!(validate_request(&no_service), Err(BookingError::MissingFields)));

        let mut blank_name = sample_request();
        blank_name.service.as_mut().unwrap().name = "  ".to_string();
        assert!(matches!(validate_request(&blank_name), Err(BookingError::MissingFields)));

        let clears: [fn(&mut BookingRequest); 3] = [
            |r| r.date.clear(),
            |r| r.time.clear(),
            |r| r.phone.clear(),
        ];
        for clear in clears {
            let mut req = sample_request();
            clear(&mut req);
            assert!(matches!(validate_request(&req), Err(BookingError::MissingFields)));
        }
    }

    #[test]
    fn validation_checks_phone_length() {
        let mut req = sample_request();
        req.phone = "0770 090".to_string();
        let err = validate_request(&req).unwrap_err();
        assert!(matches!(err, BookingError::InvalidPhone));
        assert_eq!(err.status_code(), 400);
        assert_eq!(err.to_string(), "That number looks short");
    }

    #[test]
    fn barber_and_name_are_optional() {
        let mut req = sample_request();
        req.barber = None;
        req.name = None;
        req.notes = None;
        req.email = None;
        assert!(validate_request(&req).is_ok());
    }

    #[test]
    fn escapes_all_five_characters() {
        assert_eq!(
            escape_html(r#"<b>"Tom" & 'Jerry'</b>"#),
            "&lt;b&gt;&quot;Tom&quot; &amp; &#039;Jerry&#039;&lt;/b&gt;"
        );
        assert_eq!(escape_html("plain"), "plain");
    }

    #[test]
    fn null_strings_read_as_missing() {
        let json = serde_json::json!({
            "service": {"name": null, "price": "from 28", "mins": null},
            "barber": {"name": null},
            "date": null, "time": null, "phone": "07700 900 123"
        });
        let parsed: BookingRequest = serde_json::from_value(json).unwrap();
        let service = parsed.service.as_ref().unwrap();
        assert_eq!(service.name, "");
        assert_eq!(service.price, Some(Amount::Text("from 28".to_string())));
        assert_eq!(service.mins, None);
        assert_eq!(parsed.date, "");
        assert_eq!(parsed.time, "");
        assert!(matches!(validate_request(&parsed), Err(BookingError::MissingFields)));
    }

    #[test]
    fn amounts_display_without_fraction() {
        assert_eq!(Amount::from(28u32).to_string(), "28");
        assert_eq!(Amount::Number(12.5).to_string(), "12.5");
        assert_eq!(Amount::Text("POA".to_string()).to_string(), "POA");
    }

    #[test]
    fn subject_line() {
        assert_eq!(
            lead_subject("Neo Gentleman", &sample_request()),
            "Neo Gentleman · New lead · Skin fade · 2026-10-20 10:00"
        );
    }

    #[test]
    fn email_lists_every_field() {
        let email = compose_lead_email("Neo Gentleman", &sample_request());
        assert!(email.html.contains("New booking request (DEMO lead)"));
        assert!(email.html.contains("Skin fade · £28 · 50 min"));
        assert!(email.html.contains(">Oliver<"));
        assert!(email.html.contains("10:00–10:50"));
        assert!(email.html.contains("07700 900 123"));
        assert!(email.html.contains("Client email"));
        assert!(email.html.contains("sam@example.com"));
        assert!(email.html.contains("You follow up manually."));
        assert!(email
            .html
            .contains("padding:8px 10px; border:1px solid #eee; width:160px; color:#666; font-size:13px;"));
    }

    #[test]
    fn email_fills_gaps() {
        let mut req = sample_request();
        req.barber = None;
        req.end_time = None;
        req.name = Some("   ".to_string());
        req.notes = None;
        req.email = None;
        let email = compose_lead_email("Neo Gentleman", &req);

        assert!(email.html.contains("No preference"));
        assert!(email.html.contains(">10:00<"));
        assert_eq!(email.html.matches(">—<").count(), 2);
        assert!(!email.html.contains("Client email"));
    }

    #[test]
    fn email_escapes_user_input() {
        let mut req = sample_request();
        req.notes = Some("<script>alert('x')</script>".to_string());
        let email = compose_lead_email("Neo Gentleman", &req);
        assert!(!email.html.contains("<script>"));
        assert!(email.html.contains("&lt;script&gt;alert(&#039;x&#039;)&lt;/script&gt;"));
    }

    #[tokio::test]
    async fn relay_sends_html_to_owner() {
        let mock = MockNotificationService::new();
        let result = relay_booking(&mock, "owner@example.com", "Neo Gentleman", &sample_request())
            .await
            .unwrap();
        assert_eq!(result.id, "mock-1");

        let sent = mock.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].to, "owner@example.com");
        assert!(sent[0].is_html);
        assert!(sent[0].subject.contains("New lead"));
    }

    #[tokio::test]
    async fn relay_rejects_before_sending() {
        let mock = MockNotificationService::new();
        let mut req = sample_request();
        req.time.clear();
        let err = relay_booking(&mock, "owner@example.com", "Shop", &req)
            .await
            .unwrap_err();
        assert!(matches!(err, BookingError::MissingFields));
        assert!(mock.sent().is_empty());
    }

    #[tokio::test]
    async fn relay_keeps_provider_status() {
        let mock = MockNotificationService::failing(502, "Resend error 422: Unprocessable Entity");
        let err = relay_booking(&mock, "owner@example.com", "Shop", &sample_request())
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 502);
        assert_eq!(err.to_string(), "Resend error 422: Unprocessable Entity");

        let shared: BarberbookError = err.into();
        assert!(matches!(shared, BarberbookError::ExternalServiceError { .. }));
    }

    #[test]
    fn error_conversion_keeps_status_family() {
        let cases: Vec<(BookingError, u16)> = vec![
            (BookingError::MissingConfig("RESEND_API_KEY"), 500),
            (BookingError::MissingFields, 400),
            (BookingError::UnknownService("perm".into()), 404),
            (BookingError::InvalidJson("eof".into()), 400),
            (BookingError::SlotUnavailable("10:05".into()), 409),
            (
                BookingError::Relay {
                    status_code: 504,
                    message: "operation timed out".into(),
                },
                504,
            ),
        ];
        for (err, status) in cases {
            assert_eq!(err.status_code(), status);
            let shared: BarberbookError = err.into();
            assert_eq!(shared.status_code(), status);
        }
        assert_eq!(
            BookingError::MissingConfig("RESEND_API_KEY").to_string(),
            "Missing RESEND_API_KEY"
        );
    }
}
