// --- File: crates/barberbook_booking/src/slots.rs ---
//! Bookable start times.
//!
//! There is no diary behind this: a day's slots are every step of the
//! opening window, trimmed by the current time for today and by the
//! service length for the chosen service.

use barberbook_config::BookingConfig;
use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

use crate::logic::BookingError;
use crate::time_of_day::{format_minutes, minutes_of, parse_hhmm};

/// 10:00
pub const DEFAULT_OPEN: u32 = 10 * 60;
/// 20:00
pub const DEFAULT_CLOSE: u32 = 20 * 60;
pub const DEFAULT_STEP: u32 = 15;

/// Below this many slots a day is shown as nearly full.
pub const FEW_SLOTS_THRESHOLD: usize = 8;

/// How busy a day looks on the calendar.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum AvailabilityLevel {
    None = 0,
    Few = 1,
    Plenty = 2,
}

impl AvailabilityLevel {
    pub fn from_count(count: usize) -> Self {
        match count {
            0 => Self::None,
            n if n < FEW_SLOTS_THRESHOLD => Self::Few,
            _ => Self::Plenty,
        }
    }

    pub fn as_u8(self) -> u8 {
        self as u8
    }
}

/// The daily opening window, in minutes since midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpeningHours {
    pub open: u32,
    pub close: u32,
    pub step: u32,
}

impl Default for OpeningHours {
    fn default() -> Self {
        Self {
            open: DEFAULT_OPEN,
            close: DEFAULT_CLOSE,
            step: DEFAULT_STEP,
        }
    }
}

impl OpeningHours {
    pub fn new(open: u32, close: u32, step: u32) -> Result<Self, BookingError> {
        if step == 0 {
            return Err(BookingError::InvalidOpeningHours(
                "step must be positive".to_string(),
            ));
        }
        if open >= close || close > 24 * 60 {
            return Err(BookingError::InvalidOpeningHours(format!(
                "{} - {} is not a valid window",
                format_minutes(open),
                format_minutes(close)
            )));
        }
        Ok(Self { open, close, step })
    }

    /// Reads `open_time`, `close_time` and `step_minutes`, falling back to
    /// the defaults for anything unset.
    pub fn from_config(config: &BookingConfig) -> Result<Self, BookingError> {
        let parse = |value: &Option<String>, default: u32| match value.as_deref() {
            None => Ok(default),
            Some(raw) => parse_hhmm(raw)
                .ok_or_else(|| BookingError::InvalidOpeningHours(format!("bad time {raw:?}"))),
        };
        Self::new(
            parse(&config.open_time, DEFAULT_OPEN)?,
            parse(&config.close_time, DEFAULT_CLOSE)?,
            config.step_minutes.unwrap_or(DEFAULT_STEP),
        )
    }

    /// Every start from open (inclusive) to close (exclusive).
    pub fn all_times(&self) -> Vec<String> {
        (self.open..self.close)
            .step_by(self.step as usize)
            .map(format_minutes)
            .collect()
    }

    /// `now`'s minute rounded up onto the slot grid, which starts at `open`.
    fn round_up(&self, now: NaiveDateTime) -> u32 {
        let elapsed = minutes_of(now.time()).saturating_sub(self.open);
        self.open + elapsed.div_ceil(self.step) * self.step
    }

    /// The first start still bookable today, if any.
    pub fn next_available_today(&self, now: NaiveDateTime) -> Option<String> {
        let next = self.round_up(now);
        if next >= self.close {
            return None;
        }
        Some(format_minutes(next))
    }

    /// Start times offered for `day` before any service filter.
    pub fn build_times_for_date(&self, day: NaiveDate, now: NaiveDateTime) -> Vec<String> {
        let today = now.date();
        if day < today {
            return Vec::new();
        }
        if day > today {
            return self.all_times();
        }
        let next = self.round_up(now);
        if next >= self.close {
            return Vec::new();
        }
        (self.open..self.close)
            .step_by(self.step as usize)
            .filter(|t| *t >= next)
            .map(format_minutes)
            .collect()
    }

    /// Keeps the starts where a `mins`-long appointment ends by closing.
    pub fn filter_times_for_service(&self, times: &[String], mins: u32) -> Vec<String> {
        times
            .iter()
            .filter(|t| parse_hhmm(t).is_some_and(|start| start + mins <= self.close))
            .cloned()
            .collect()
    }

    pub fn times_for_day(
        &self,
        day: NaiveDate,
        now: NaiveDateTime,
        service_mins: Option<u32>,
    ) -> Vec<String> {
        let times = self.build_times_for_date(day, now);
        match service_mins {
            Some(mins) => self.filter_times_for_service(&times, mins),
            None => times,
        }
    }

    /// First offered start for `day`, shown as "next available".
    pub fn next_for_day(
        &self,
        day: NaiveDate,
        now: NaiveDateTime,
        service_mins: Option<u32>,
    ) -> Option<String> {
        self.times_for_day(day, now, service_mins).into_iter().next()
    }

    pub fn day_level(
        &self,
        day: NaiveDate,
        now: NaiveDateTime,
        service_mins: Option<u32>,
    ) -> AvailabilityLevel {
        if day < now.date() {
            return AvailabilityLevel::None;
        }
        AvailabilityLevel::from_count(self.times_for_day(day, now, service_mins).len())
    }
}
