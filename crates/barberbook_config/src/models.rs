// --- File: crates/barberbook_config/src/models.rs ---

use serde::{Deserialize, Serialize};

pub const DEFAULT_SHOP_NAME: &str = "Neo Gentleman";
pub const DEFAULT_FROM_EMAIL: &str = "Neo Gentleman <onboarding@resend.dev>";
pub const DEFAULT_TIME_ZONE: &str = "Europe/London";
pub const DEFAULT_RESEND_BASE_URL: &str = "https://api.resend.com";

// --- General Server Config ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

// --- Booking Config ---
// Opening window and lead routing. The owner address is usually a marker
// ("secret_from_env") resolved from BOOKING_BARBER_EMAIL.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct BookingConfig {
    #[serde(default)]
    pub shop_name: Option<String>,
    /// IANA zone used to read the shop's wall clock, e.g. "Europe/London".
    #[serde(default)]
    pub time_zone: Option<String>,
    /// "HH:MM", first bookable start.
    #[serde(default)]
    pub open_time: Option<String>,
    /// "HH:MM", no appointment may run past this.
    #[serde(default)]
    pub close_time: Option<String>,
    #[serde(default)]
    pub step_minutes: Option<u32>,
    #[serde(default)]
    pub from_email: Option<String>, // BOOKING_FROM_EMAIL
    #[serde(default)]
    pub barber_email: Option<String>, // BOOKING_BARBER_EMAIL
    /// Origins allowed to post from the marketing site. Empty means any.
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

impl BookingConfig {
    pub fn shop_name(&self) -> &str {
        non_empty(&self.shop_name).unwrap_or(DEFAULT_SHOP_NAME)
    }

    pub fn from_email(&self) -> &str {
        non_empty(&self.from_email).unwrap_or(DEFAULT_FROM_EMAIL)
    }

    pub fn time_zone(&self) -> &str {
        non_empty(&self.time_zone).unwrap_or(DEFAULT_TIME_ZONE)
    }

    pub fn barber_email(&self) -> Option<&str> {
        non_empty(&self.barber_email)
    }
}

// --- Resend Config ---
// api_key is loaded from RESEND_API_KEY through the secret marker.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct ResendConfig {
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub base_url: Option<String>,
}

impl ResendConfig {
    pub fn api_key(&self) -> Option<&str> {
        non_empty(&self.api_key)
    }

    pub fn base_url(&self) -> &str {
        non_empty(&self.base_url).unwrap_or(DEFAULT_RESEND_BASE_URL)
    }
}

// --- Unified App Configuration ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    // Server config is mandatory
    pub server: ServerConfig,

    // --- Runtime Flags (optional in config file, default to false) ---
    #[serde(default)]
    pub use_resend: bool,

    #[serde(default)]
    pub booking: BookingConfig,
    #[serde(default)]
    pub resend: Option<ResendConfig>,
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
}
