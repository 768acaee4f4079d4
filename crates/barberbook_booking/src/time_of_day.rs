// --- File: crates/barberbook_booking/src/time_of_day.rs ---
//! Wall-clock "HH:MM" strings and minutes since midnight.

use chrono::{NaiveTime, Timelike};

/// Minutes since midnight for "HH:MM". Hours 0-23, minutes 0-59.
pub fn parse_hhmm(value: &str) -> Option<u32> {
    let (h, m) = value.trim().split_once(':')?;
    if h.is_empty() || m.len() != 2 || h.len() > 2 {
        return None;
    }
    let h: u32 = h.parse().ok()?;
    let m: u32 = m.parse().ok()?;
    (h < 24 && m < 60).then_some(h * 60 + m)
}

/// Zero-padded "HH:MM". Values past midnight keep counting hours ("24:10").
pub fn format_minutes(mins: u32) -> String {
    format!("{:02}:{:02}", mins / 60, mins % 60)
}

/// Minutes since midnight of `time`, seconds dropped.
pub fn minutes_of(time: NaiveTime) -> u32 {
    time.hour() * 60 + time.minute()
}

pub fn add_minutes(hhmm: &str, add: u32) -> Option<String> {
    parse_hhmm(hhmm).map(|start| format_minutes(start + add))
}

/// End of an appointment starting at `start` that lasts `mins`.
pub fn end_time(start: &str, mins: u32) -> Option<String> {
    add_minutes(start, mins)
}
