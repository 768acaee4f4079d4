// --- File: crates/barberbook_booking/src/calendar.rs ---
use std::collections::BTreeMap;

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime};

use crate::slots::{AvailabilityLevel, OpeningHours};

/// A month laid out Monday-first, padded with `None` to whole weeks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthGrid {
    pub year: i32,
    pub month: u32,
    pub cells: Vec<Option<NaiveDate>>,
}

impl MonthGrid {
    pub fn weeks(&self) -> impl Iterator<Item = &[Option<NaiveDate>]> {
        self.cells.chunks(7)
    }

    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.cells.iter().flatten().copied()
    }

    pub fn first_day(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
    }
}

pub fn month_grid(year: i32, month: u32) -> Option<MonthGrid> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let (ny, nm) = next_month(year, month);
    let last = NaiveDate::from_ymd_opt(ny, nm, 1)? - Duration::days(1);

    let lead = first.weekday().num_days_from_monday() as usize;
    let mut cells: Vec<Option<NaiveDate>> = vec![None; lead];
    cells.extend(first.iter_days().take(last.day() as usize).map(Some));
    while cells.len() % 7 != 0 {
        cells.push(None);
    }

    Some(MonthGrid { year, month, cells })
}

pub fn previous_month(year: i32, month: u32) -> (i32, u32) {
    if month <= 1 {
        (year - 1, 12)
    } else {
        (year, month - 1)
    }
}

pub fn next_month(year: i32, month: u32) -> (i32, u32) {
    if month >= 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    }
}

/// "2026-10" → (2026, 10)
pub fn parse_month(value: &str) -> Option<(i32, u32)> {
    let (y, m) = value.trim().split_once('-')?;
    let year: i32 = y.parse().ok()?;
    let month: u32 = m.parse().ok()?;
    (1..=12).contains(&month).then_some((year, month))
}

pub fn format_month(year: i32, month: u32) -> String {
    format!("{year:04}-{month:02}")
}

pub fn parse_iso_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
}

pub fn format_iso_date(day: NaiveDate) -> String {
    day.format("%Y-%m-%d").to_string()
}

/// "Tue, 20 Oct"
pub fn pretty_day_long(day: NaiveDate) -> String {
    day.format("%a, %d %b").to_string()
}

/// "October 2026"
pub fn pretty_month(day: NaiveDate) -> String {
    day.format("%B %Y").to_string()
}

/// Days before today cannot be picked.
pub fn is_disabled_day(day: NaiveDate, today: NaiveDate) -> bool {
    day < today
}

/// Availability level for every day of `grid`.
pub fn month_availability(
    grid: &MonthGrid,
    hours: &OpeningHours,
    now: NaiveDateTime,
    service_mins: Option<u32>,
) -> BTreeMap<NaiveDate, AvailabilityLevel> {
    grid.days()
        .map(|day| (day, hours.day_level(day, now, service_mins)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn grid_starts_on_monday() {
        // 1 Oct 2026 is a Thursday
        let grid = month_grid(2026, 10).unwrap();
        assert_eq!(grid.cells.len(), 35);
        assert_eq!(&grid.cells[..3], &[None, None, None]);
        assert_eq!(grid.cells[3], Some(date(2026, 10, 1)));
        assert_eq!(grid.cells[33], Some(date(2026, 10, 31)));
        assert_eq!(grid.cells[34], None);
        assert_eq!(grid.days().count(), 31);
        assert_eq!(grid.weeks().count(), 5);
    }

    #[test]
    fn grid_without_padding() {
        // February 2027 starts on a Monday and has 28 days
        let grid = month_grid(2027, 2).unwrap();
        assert_eq!(grid.cells.len(), 28);
        assert!(grid.cells.iter().all(Option::is_some));
    }

    #[test]
    fn grid_with_six_weeks() {
        let grid = month_grid(2026, 3).unwrap();
        assert_eq!(grid.cells.len(), 42);
        assert_eq!(grid.cells[6], Some(date(2026, 3, 1)));
    }

    #[test]
    fn invalid_month_has_no_grid() {
        assert!(month_grid(2026, 13).is_none());
        assert!(month_grid(2026, 0).is_none());
    }

    #[test]
    fn month_navigation_wraps_years() {
        assert_eq!(previous_month(2026, 1), (2025, 12));
        assert_eq!(previous_month(2026, 10), (2026, 9));
        assert_eq!(next_month(2026, 12), (2027, 1));
        assert_eq!(next_month(2026, 10), (2026, 11));
    }

    #[test]
    fn month_and_date_strings() {
        assert_eq!(parse_month("2026-10"), Some((2026, 10)));
        assert_eq!(parse_month("2026-13"), None);
        assert_eq!(parse_month("October"), None);
        assert_eq!(format_month(2026, 3), "2026-03");

        assert_eq!(parse_iso_date("2026-10-20"), Some(date(2026, 10, 20)));
        assert_eq!(parse_iso_date("20/10/2026"), None);
        assert_eq!(format_iso_date(date(2026, 1, 5)), "2026-01-05");
    }

    #[test]
    fn pretty_labels() {
        assert_eq!(pretty_day_long(date(2026, 10, 20)), "Tue, 20 Oct");
        assert_eq!(pretty_day_long(date(2026, 11, 2)), "Mon, 02 Nov");
        assert_eq!(pretty_month(date(2026, 10, 1)), "October 2026");
    }

    #[test]
    fn past_days_are_disabled() {
        let today = date(2026, 10, 19);
        assert!(is_disabled_day(date(2026, 10, 18), today));
        assert!(!is_disabled_day(today, today));
        assert!(!is_disabled_day(date(2026, 10, 20), today));
    }

    #[test]
    fn availability_for_a_month() {
        let grid = month_grid(2026, 10).unwrap();
        let now = date(2026, 10, 19).and_hms_opt(18, 30, 0).unwrap();
        let levels = month_availability(&grid, &OpeningHours::default(), now, Some(50));

        assert_eq!(levels.len(), 31);
        assert_eq!(levels[&date(2026, 10, 18)], AvailabilityLevel::None);
        assert_eq!(levels[&date(2026, 10, 19)], AvailabilityLevel::Few);
        assert_eq!(levels[&date(2026, 10, 20)], AvailabilityLevel::Plenty);
    }
}
