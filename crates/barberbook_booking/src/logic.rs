// --- File: crates/barberbook_booking/src/logic.rs ---
use barberbook_common::error::{BarberbookError, HttpStatusCode};
use barberbook_common::services::{BoxedError, NotificationResult, NotificationService};
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::phone::{digits_only, is_phone_valid};

// --- Error Handling ---
#[derive(Error, Debug)]
pub enum BookingError {
    /// A required setting is absent; the message names the env var.
    #[error("Missing {0}")]
    MissingConfig(&'static str),
    #[error("Missing required fields")]
    MissingFields,
    #[error("That number looks short")]
    InvalidPhone,
    #[error("Invalid JSON: {0}")]
    InvalidJson(String),
    #[error("Unknown service: {0}")]
    UnknownService(String),
    #[error("Unknown barber: {0}")]
    UnknownBarber(String),
    #[error("Invalid date (YYYY-MM-DD): {0}")]
    InvalidDate(String),
    #[error("Invalid month (YYYY-MM): {0}")]
    InvalidMonth(String),
    #[error("{0} is not available")]
    SlotUnavailable(String),
    #[error("Invalid opening hours: {0}")]
    InvalidOpeningHours(String),
    #[error("Unknown time zone: {0}")]
    InvalidTimeZone(String),
    /// The e-mail provider refused or could not be reached.
    #[error("{message}")]
    Relay { status_code: u16, message: String },
}

impl HttpStatusCode for BookingError {
    fn status_code(&self) -> u16 {
        match self {
            BookingError::MissingConfig(_) => 500,
            BookingError::MissingFields => 400,
            BookingError::InvalidPhone => 400,
            BookingError::InvalidJson(_) => 400,
            BookingError::UnknownService(_) => 404,
            BookingError::UnknownBarber(_) => 404,
            BookingError::InvalidDate(_) => 400,
            BookingError::InvalidMonth(_) => 400,
            BookingError::SlotUnavailable(_) => 409,
            BookingError::InvalidOpeningHours(_) => 500,
            BookingError::InvalidTimeZone(_) => 500,
            BookingError::Relay { status_code, .. } => *status_code,
        }
    }
}

impl From<BoxedError> for BookingError {
    fn from(err: BoxedError) -> Self {
        BookingError::Relay {
            status_code: err.status_code(),
            message: err.to_string(),
        }
    }
}

impl From<BookingError> for BarberbookError {
    fn from(err: BookingError) -> Self {
        match err {
            BookingError::MissingConfig(_)
            | BookingError::InvalidOpeningHours(_)
            | BookingError::InvalidTimeZone(_) => BarberbookError::ConfigError(err.to_string()),
            BookingError::UnknownService(_) | BookingError::UnknownBarber(_) => {
                BarberbookError::NotFoundError(err.to_string())
            }
            BookingError::InvalidJson(msg) => BarberbookError::ParseError(msg),
            BookingError::Relay {
                status_code: 502,
                message,
            } => BarberbookError::ExternalServiceError {
                service_name: "Resend".to_string(),
                message,
            },
            BookingError::Relay {
                status_code: 504,
                message,
            } => BarberbookError::TimeoutError(message),
            BookingError::Relay { message, .. } => BarberbookError::HttpError(message),
            BookingError::SlotUnavailable(_) => BarberbookError::ConflictError(err.to_string()),
            BookingError::MissingFields
            | BookingError::InvalidPhone
            | BookingError::InvalidDate(_)
            | BookingError::InvalidMonth(_) => BarberbookError::ValidationError(err.to_string()),
        }
    }
}

// --- Data Structures ---

/// A price or duration as posted; numbers are expected, text is relayed as is.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(untagged)]
pub enum Amount {
    Number(f64),
    Text(String),
}

impl From<u32> for Amount {
    fn from(value: u32) -> Self {
        Amount::Number(f64::from(value))
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Amount::Number(n) => write!(f, "{n}"),
            Amount::Text(t) => f.write_str(t),
        }
    }
}

/// `null` reads as an empty string, so validation reports it as missing.
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// The service as the client saw it when it posted.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ServiceSelection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
    #[cfg_attr(feature = "openapi", schema(value_type = Option<f64>))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<Amount>,
    #[cfg_attr(feature = "openapi", schema(value_type = Option<f64>))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mins: Option<Amount>,
}

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct BarberSelection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
}

/// Body of `POST /booking`.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    #[serde(default)]
    pub service: Option<ServiceSelection>,
    /// Absent means "no preference".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub barber: Option<BarberSelection>,
    #[cfg_attr(feature = "openapi", schema(format = "date", example = "2026-10-20"))]
    #[serde(default, deserialize_with = "null_as_empty")]
    pub date: String,
    #[cfg_attr(feature = "openapi", schema(example = "10:00"))]
    #[serde(default, deserialize_with = "null_as_empty")]
    pub time: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// `{ok:true}` or `{ok:false, error}`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct BookingResponse {
    pub ok: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl BookingResponse {
    pub fn ok() -> Self {
        Self { ok: true, error: None }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            error: Some(message.into()),
        }
    }
}

/// The e-mail sent to the shop for one booking request.
#[derive(Debug, Clone, PartialEq)]
pub struct LeadEmail {
    pub subject: String,
    pub html: String,
}

// --- Core Logic ---

fn filled(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// Checks that a request carries enough to follow up on.
pub fn validate_request(req: &BookingRequest) -> Result<(), BookingError> {
    let service_name = req
        .service
        .as_ref()
        .map(|s| s.name.trim())
        .unwrap_or_default();
    if service_name.is_empty()
        || req.date.trim().is_empty()
        || req.time.trim().is_empty()
        || req.phone.trim().is_empty()
    {
        return Err(BookingError::MissingFields);
    }
    if !is_phone_valid(&req.phone) {
        debug!("rejecting phone with {} digits", digits_only(&req.phone).len());
        return Err(BookingError::InvalidPhone);
    }
    Ok(())
}

pub fn escape_html(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            _ => out.push(c),
        }
    }
    out
}

const LABEL_CELL: &str =
    "padding:8px 10px; border:1px solid #eee; width:160px; color:#666; font-size:13px;";
const VALUE_CELL: &str = "padding:8px 10px; border:1px solid #eee; color:#111;";

fn row(label: &str, value: &str) -> String {
    format!(
        "<tr><td style=\"{LABEL_CELL}\">{}</td><td style=\"{VALUE_CELL}\">{}</td></tr>",
        escape_html(label),
        escape_html(value)
    )
}

fn opt_amount(value: Option<&Amount>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

pub fn lead_subject(shop: &str, req: &BookingRequest) -> String {
    let service = req.service.as_ref().map(|s| s.name.as_str()).unwrap_or("");
    format!(
        "{} · New lead · {} · {} {}",
        shop, service, req.date, req.time
    )
}

/// Builds the owner's e-mail. Every interpolated value is escaped.
pub fn compose_lead_email(shop: &str, req: &BookingRequest) -> LeadEmail {
    let service = req.service.clone().unwrap_or_default();
    let barber = req
        .barber
        .as_ref()
        .map(|b| b.name.trim())
        .filter(|n| !n.is_empty())
        .unwrap_or("No preference");
    let time = match filled(&req.end_time) {
        Some(end) => format!("{}–{}", req.time, end),
        None => req.time.clone(),
    };

    let mut rows = vec![
        row(
            "Service",
            &format!(
                "{} · £{} · {} min",
                service.name,
                opt_amount(service.price.as_ref()),
                opt_amount(service.mins.as_ref())
            ),
        ),
        row("Barber", barber),
        row("Date", &req.date),
        row("Time", &time),
        row("Phone", &req.phone),
        row("Name", filled(&req.name).unwrap_or("—")),
        row("Notes", filled(&req.notes).unwrap_or("—")),
    ];
    if let Some(email) = filled(&req.email) {
        rows.push(row("Client email", email));
    }

    let html = format!(
        "<div style=\"font-family: ui-sans-serif, system-ui; line-height:1.5\">\
<h2 style=\"margin:0 0 8px 0;\">New booking request (DEMO lead)</h2>\
<p style=\"margin:0 0 14px 0; color:#444;\">{}</p>\
<table style=\"border-collapse:collapse; width:100%; max-width:640px;\">{}</table>\
<p style=\"margin:18px 0 0 0; color:#666; font-size:13px;\">\
Demo mode: client does NOT receive automated emails/SMS. You follow up manually.</p></div>",
        escape_html(shop),
        rows.join("")
    );

    LeadEmail {
        subject: lead_subject(shop, req),
        html,
    }
}

/// Validates `req` and e-mails it to `to`.
pub async fn relay_booking(
    notifier: &dyn NotificationService<Error = BoxedError>,
    to: &str,
    shop: &str,
    req: &BookingRequest,
) -> Result<NotificationResult, BookingError> {
    validate_request(req)?;
    let email = compose_lead_email(shop, req);

    let result = notifier
        .send_email(to, &email.subject, &email.html, true)
        .await
        .map_err(|e| {
            warn!("lead e-mail failed: {}", e);
            BookingError::from(e)
        })?;

    info!(
        "lead e-mail accepted: id={} status={}",
        result.id, result.status
    );
    Ok(result)
}
