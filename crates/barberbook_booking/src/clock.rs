// --- File: crates/barberbook_booking/src/clock.rs ---
use chrono::{NaiveDateTime, Utc};
use chrono_tz::Tz;

use crate::logic::BookingError;

/// Source of the shop's local wall-clock time.
///
/// Slot lists depend on "now", so handlers read it through this trait and
/// tests pin it.
#[cfg_attr(test, mockall::automock)]
pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;
}

/// The real clock, read in the shop's time zone.
#[derive(Debug, Clone, Copy)]
pub struct ShopClock {
    tz: Tz,
}

impl ShopClock {
    pub fn new(tz: Tz) -> Self {
        Self { tz }
    }

    /// Builds a clock from an IANA name such as "Europe/London".
    pub fn from_name(name: &str) -> Result<Self, BookingError> {
        name.parse::<Tz>()
            .map(Self::new)
            .map_err(|_| BookingError::InvalidTimeZone(name.to_string()))
    }

    pub fn time_zone(&self) -> Tz {
        self.tz
    }
}

impl Clock for ShopClock {
    fn now(&self) -> NaiveDateTime {
        Utc::now().with_timezone(&self.tz).naive_local()
    }
}

/// A clock stuck at one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn shop_clock_parses_zone_names() {
        let clock = ShopClock::from_name("Europe/London").unwrap();
        assert_eq!(clock.time_zone(), Tz::Europe__London);
        assert!(matches!(
            ShopClock::from_name("Mars/Olympus"),
            Err(BookingError::InvalidTimeZone(_))
        ));
    }

    #[test]
    fn fixed_clock_does_not_move() {
        let at = NaiveDate::from_ymd_opt(2026, 10, 19)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap();
        let clock = FixedClock(at);
        assert_eq!(clock.now(), at);
        assert_eq!(clock.now(), at);
    }
}
