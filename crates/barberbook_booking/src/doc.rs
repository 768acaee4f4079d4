// File: crates/barberbook_booking/src/doc.rs

#![allow(dead_code)]
#![cfg(feature = "openapi")]
use utoipa::OpenApi;

use crate::catalog::{Barber, Service, ServiceBadge, ServiceCategory, ServiceCategoryKey};
use crate::handlers::{
    CalendarDay, CalendarQuery, CalendarResponse, CatalogResponse, SlotTime, SlotsQuery,
    SlotsResponse,
};
use crate::logic::{BarberSelection, BookingRequest, BookingResponse, ServiceSelection};
use crate::slots::AvailabilityLevel;

#[utoipa::path(
    post,
    path = "/booking",
    request_body(content = BookingRequest, example = json!({
        "service": {"key": "skin_fade", "name": "Skin fade", "price": 28, "mins": 50},
        "barber": {"key": "oliver", "name": "Oliver"},
        "date": "2026-10-20",
        "time": "10:00",
        "endTime": "10:50",
        "phone": "07700 900 123",
        "name": "Sam",
        "notes": "Beard trim"
    })),
    responses(
        (status = 200, description = "Lead e-mailed to the shop", body = BookingResponse,
         example = json!({"ok": true})),
        (status = 400, description = "Missing fields, short phone or malformed JSON", body = BookingResponse,
         example = json!({"ok": false, "error": "Missing required fields"})),
        (status = 500, description = "Relay not configured or unreachable", body = BookingResponse,
         example = json!({"ok": false, "error": "Missing RESEND_API_KEY"})),
        (status = 502, description = "E-mail provider refused the message", body = BookingResponse,
         example = json!({"ok": false, "error": "Resend error 422: Unprocessable Entity"}))
    ),
    tag = "Booking"
)]
fn doc_submit_booking_handler() {}

#[utoipa::path(
    get,
    path = "/booking/catalog",
    responses(
        (status = 200, description = "Barbers, services and note chips", body = CatalogResponse)
    ),
    tag = "Booking"
)]
fn doc_get_catalog_handler() {}

#[utoipa::path(
    get,
    path = "/booking/slots",
    params(SlotsQuery),
    responses(
        (status = 200, description = "Bookable start times for the day", body = SlotsResponse),
        (status = 400, description = "Invalid date"),
        (status = 404, description = "Unknown service")
    ),
    tag = "Booking"
)]
fn doc_get_slots_handler() {}

#[utoipa::path(
    get,
    path = "/booking/calendar",
    params(CalendarQuery),
    responses(
        (status = 200, description = "Month grid with availability per day", body = CalendarResponse),
        (status = 400, description = "Invalid month"),
        (status = 404, description = "Unknown service")
    ),
    tag = "Booking"
)]
fn doc_get_calendar_handler() {}

#[derive(OpenApi)]
#[openapi(
    paths(
        doc_submit_booking_handler,
        doc_get_catalog_handler,
        doc_get_slots_handler,
        doc_get_calendar_handler
    ),
    components(
        schemas(
            BookingRequest,
            BookingResponse,
            ServiceSelection,
            BarberSelection,
            CatalogResponse,
            Barber,
            Service,
            ServiceBadge,
            ServiceCategory,
            ServiceCategoryKey,
            SlotsQuery,
            SlotsResponse,
            SlotTime,
            CalendarQuery,
            CalendarResponse,
            CalendarDay,
            AvailabilityLevel
        )
    ),
    tags(
        (name = "Booking", description = "Booking flow and lead relay")
    )
)]
pub struct BookingApiDoc;
