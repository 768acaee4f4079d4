// File: crates/barberbook_booking/src/handlers.rs
use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Query, State},
    http::StatusCode,
    response::Json,
};
use barberbook_common::error::{BarberbookError, HttpStatusCode};
use barberbook_common::services::{NotificationResult, ServiceFactory};
use barberbook_config::AppConfig;
use chrono::Datelike;
use serde::{Deserialize, Serialize};
use tracing::{info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::calendar::{
    format_iso_date, format_month, is_disabled_day, month_availability, month_grid, next_month,
    parse_iso_date, parse_month, pretty_day_long, pretty_month, previous_month,
};
use crate::catalog::{self, Barber, Service, ServiceCategory, NOTE_CHIPS};
use crate::clock::{Clock, ShopClock};
use crate::logic::{relay_booking, BookingError, BookingRequest, BookingResponse};
use crate::slots::{AvailabilityLevel, OpeningHours};
use crate::time_of_day::end_time;

// Shared state for the booking routes
#[derive(Clone)]
pub struct BookingState {
    pub config: Arc<AppConfig>,
    pub hours: OpeningHours,
    pub clock: Arc<dyn Clock>,
    pub services: Arc<dyn ServiceFactory>,
}

impl BookingState {
    /// Builds the state from config: opening window and the shop's time zone.
    pub fn new(
        config: Arc<AppConfig>,
        services: Arc<dyn ServiceFactory>,
    ) -> Result<Self, BookingError> {
        let hours = OpeningHours::from_config(&config.booking)?;
        let clock = ShopClock::from_name(config.booking.time_zone())?;
        Ok(Self {
            config,
            hours,
            clock: Arc::new(clock),
            services,
        })
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }
}

// --- Views ---

#[derive(Serialize, Debug)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CatalogResponse {
    #[cfg_attr(feature = "openapi", schema(value_type = Vec<Barber>))]
    pub barbers: &'static [Barber],
    #[cfg_attr(feature = "openapi", schema(value_type = Vec<ServiceCategory>))]
    pub categories: &'static [ServiceCategory],
    #[cfg_attr(feature = "openapi", schema(value_type = Vec<String>))]
    pub note_chips: &'static [&'static str],
}

#[derive(Deserialize, Debug, Default)]
#[cfg_attr(feature = "openapi", derive(utoipa::IntoParams, utoipa::ToSchema))]
#[cfg_attr(feature = "openapi", into_params(parameter_in = Query))]
pub struct SlotsQuery {
    /// YYYY-MM-DD, defaults to today
    #[cfg_attr(feature = "openapi", schema(format = "date", example = "2026-10-20"))]
    pub date: Option<String>,
    /// Service key; trims starts that would run past closing
    #[cfg_attr(feature = "openapi", schema(example = "skin_fade"))]
    pub service: Option<String>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct SlotTime {
    pub time: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
}

#[derive(Serialize, Debug)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct SlotsResponse {
    pub date: String,
    pub pretty_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service: Option<String>,
    pub times: Vec<SlotTime>,
    pub next: Option<String>,
    pub level: AvailabilityLevel,
}

#[derive(Deserialize, Debug, Default)]
#[cfg_attr(feature = "openapi", derive(utoipa::IntoParams, utoipa::ToSchema))]
#[cfg_attr(feature = "openapi", into_params(parameter_in = Query))]
pub struct CalendarQuery {
    /// YYYY-MM, defaults to the current month
    #[cfg_attr(feature = "openapi", schema(example = "2026-10"))]
    pub month: Option<String>,
    #[cfg_attr(feature = "openapi", schema(example = "skin_fade"))]
    pub service: Option<String>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CalendarDay {
    pub date: String,
    pub day: u32,
    pub level: AvailabilityLevel,
    pub disabled: bool,
    pub today: bool,
}

#[derive(Serialize, Debug)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CalendarResponse {
    pub month: String,
    pub label: String,
    pub previous: String,
    pub next: String,
    /// Monday-first weeks; `null` pads days outside the month.
    pub weeks: Vec<Vec<Option<CalendarDay>>>,
}

fn lookup_service(key: Option<&str>) -> Result<Option<&'static Service>, BookingError> {
    match key.map(str::trim).filter(|k| !k.is_empty()) {
        None => Ok(None),
        Some(key) => catalog::find_service(key)
            .map(Some)
            .ok_or_else(|| BookingError::UnknownService(key.to_string())),
    }
}

// --- Handlers ---

/// Barbers, services and note chips.
pub async fn get_catalog_handler() -> Json<CatalogResponse> {
    Json(CatalogResponse {
        barbers: catalog::barbers(),
        categories: catalog::categories(),
        note_chips: &NOTE_CHIPS,
    })
}

/// Start times for one day.
pub async fn get_slots_handler(
    State(state): State<Arc<BookingState>>,
    Query(query): Query<SlotsQuery>,
) -> Result<Json<SlotsResponse>, BarberbookError> {
    let now = state.clock.now();
    let day = match query.date.as_deref() {
        Some(raw) => {
            parse_iso_date(raw).ok_or_else(|| BookingError::InvalidDate(raw.to_string()))?
        }
        None => now.date(),
    };
    let service = lookup_service(query.service.as_deref())?;
    let mins = service.map(|s| s.mins);

    let times: Vec<SlotTime> = state
        .hours
        .times_for_day(day, now, mins)
        .into_iter()
        .map(|time| SlotTime {
            end_time: mins.and_then(|m| end_time(&time, m)),
            time,
        })
        .collect();

    Ok(Json(SlotsResponse {
        date: format_iso_date(day),
        pretty_date: pretty_day_long(day),
        service: service.map(|s| s.key.to_string()),
        next: times.first().map(|t| t.time.clone()),
        level: state.hours.day_level(day, now, mins),
        times,
    }))
}

/// A month of days with their availability.
pub async fn get_calendar_handler(
    State(state): State<Arc<BookingState>>,
    Query(query): Query<CalendarQuery>,
) -> Result<Json<CalendarResponse>, BarberbookError> {
    let now = state.clock.now();
    let today = now.date();
    let (year, month) = match query.month.as_deref() {
        Some(raw) => {
            parse_month(raw).ok_or_else(|| BookingError::InvalidMonth(raw.to_string()))?
        }
        None => (today.year(), today.month()),
    };
    let service = lookup_service(query.service.as_deref())?;
    let grid = month_grid(year, month)
        .ok_or_else(|| BookingError::InvalidMonth(format_month(year, month)))?;
    let levels = month_availability(&grid, &state.hours, now, service.map(|s| s.mins));

    let weeks: Vec<Vec<Option<CalendarDay>>> = grid
        .weeks()
        .map(|week| {
            week.iter()
                .map(|cell| {
                    cell.map(|day| CalendarDay {
                        date: format_iso_date(day),
                        day: day.day(),
                        level: levels.get(&day).copied().unwrap_or(AvailabilityLevel::None),
                        disabled: is_disabled_day(day, today),
                        today: day == today,
                    })
                })
                .collect::<Vec<_>>()
        })
        .collect();

    let (py, pm) = previous_month(year, month);
    let (ny, nm) = next_month(year, month);
    Ok(Json(CalendarResponse {
        month: format_month(year, month),
        label: grid.first_day().map(pretty_month).unwrap_or_default(),
        previous: format_month(py, pm),
        next: format_month(ny, nm),
        weeks,
    }))
}

/// Relays one booking request to the shop owner by e-mail.
///
/// Always answers with the `{ok, error}` envelope.
pub async fn submit_booking_handler(
    State(state): State<Arc<BookingState>>,
    payload: Result<Json<BookingRequest>, JsonRejection>,
) -> (StatusCode, Json<BookingResponse>) {
    let lead_id = Uuid::new_v4();
    let span = info_span!("booking_lead", %lead_id);

    async move {
        match relay(&state, payload).await {
            Ok(result) => {
                info!("lead relayed as {}", result.id);
                (StatusCode::OK, Json(BookingResponse::ok()))
            }
            Err(err) => {
                let status = StatusCode::from_u16(err.status_code())
                    .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
                warn!("lead rejected ({}): {}", status, err);
                (status, Json(BookingResponse::error(err.to_string())))
            }
        }
    }
    .instrument(span)
    .await
}

async fn relay(
    state: &BookingState,
    payload: Result<Json<BookingRequest>, JsonRejection>,
) -> Result<NotificationResult, BookingError> {
    let notifier = state
        .services
        .notification_service()
        .ok_or(BookingError::MissingConfig("RESEND_API_KEY"))?;
    let owner = state
        .config
        .booking
        .barber_email()
        .ok_or(BookingError::MissingConfig("BOOKING_BARBER_EMAIL"))?;

    let Json(request) =
        payload.map_err(|rejection| BookingError::InvalidJson(rejection.body_text()))?;

    relay_booking(
        notifier.as_ref(),
        owner,
        state.config.booking.shop_name(),
        &request,
    )
    .await
}
