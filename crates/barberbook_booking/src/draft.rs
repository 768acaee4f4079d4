// --- File: crates/barberbook_booking/src/draft.rs ---
//! In-memory state of one customer's booking, step by step.
//!
//! A draft is never persisted. It knows which step is showing, whether
//! that step is complete, what the buttons should say, and how to turn
//! itself into a [`BookingRequest`].

use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

use crate::calendar::pretty_day_long;
use crate::catalog::{find_barber, find_service, Barber, Service};
use crate::logic::{BarberSelection, BookingError, BookingRequest, ServiceSelection};
use crate::phone::{format_uk_phone, is_phone_valid, phone_hint};
use crate::slots::OpeningHours;
use crate::time_of_day::end_time;

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Step {
    /// Barber and service.
    Choose = 1,
    Date = 2,
    /// Time and contact details.
    Time = 3,
}

impl Step {
    pub fn number(self) -> u8 {
        self as u8
    }

    pub fn next(self) -> Option<Step> {
        match self {
            Step::Choose => Some(Step::Date),
            Step::Date => Some(Step::Time),
            Step::Time => None,
        }
    }

    pub fn previous(self) -> Option<Step> {
        match self {
            Step::Choose => None,
            Step::Date => Some(Step::Choose),
            Step::Time => Some(Step::Date),
        }
    }

    /// Share of the flow done once this step shows.
    pub fn progress(self) -> f32 {
        match self {
            Step::Choose => 0.33,
            Step::Date => 0.66,
            Step::Time => 1.0,
        }
    }
}

/// One labelled piece of the summary line and the step that edits it.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct SummaryPart {
    pub label: String,
    pub step: Step,
}

#[derive(Debug, Clone)]
pub struct BookingDraft {
    step: Step,
    today: NaiveDate,
    barber: Option<&'static Barber>,
    service: Option<&'static Service>,
    date: NaiveDate,
    time: Option<String>,
    phone: String,
    name: String,
    notes: String,
    email: String,
    sending: bool,
    sent: bool,
}

impl BookingDraft {
    /// A fresh draft on step one, dated today.
    pub fn new(today: NaiveDate) -> Self {
        Self {
            step: Step::Choose,
            today,
            barber: None,
            service: None,
            date: today,
            time: None,
            phone: String::new(),
            name: String::new(),
            notes: String::new(),
            email: String::new(),
            sending: false,
            sent: false,
        }
    }

    pub fn step(&self) -> Step {
        self.step
    }

    pub fn barber(&self) -> Option<&'static Barber> {
        self.barber
    }

    pub fn service(&self) -> Option<&'static Service> {
        self.service
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn time(&self) -> Option<&str> {
        self.time.as_deref()
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }

    pub fn notes(&self) -> &str {
        &self.notes
    }

    pub fn is_sending(&self) -> bool {
        self.sending
    }

    pub fn is_sent(&self) -> bool {
        self.sent
    }

    fn clear_time(&mut self) {
        self.time = None;
        self.sent = false;
    }

    pub fn pick_barber(&mut self, key: &str) -> Result<&'static Barber, BookingError> {
        let barber =
            find_barber(key).ok_or_else(|| BookingError::UnknownBarber(key.to_string()))?;
        self.barber = Some(barber);
        self.clear_time();
        Ok(barber)
    }

    pub fn pick_service(&mut self, key: &str) -> Result<&'static Service, BookingError> {
        let service =
            find_service(key).ok_or_else(|| BookingError::UnknownService(key.to_string()))?;
        self.service = Some(service);
        self.clear_time();
        Ok(service)
    }

    pub fn pick_date(&mut self, date: NaiveDate) {
        self.date = date;
        self.clear_time();
    }

    /// Start times the time step would offer right now.
    pub fn available_times(&self, hours: &OpeningHours, now: NaiveDateTime) -> Vec<String> {
        hours.times_for_day(self.date, now, self.service.map(|s| s.mins))
    }

    /// Picks `time` if it is one of the offered starts.
    pub fn pick_time(
        &mut self,
        time: &str,
        hours: &OpeningHours,
        now: NaiveDateTime,
    ) -> Result<(), BookingError> {
        if !self.available_times(hours, now).iter().any(|t| t == time) {
            return Err(BookingError::SlotUnavailable(time.to_string()));
        }
        self.time = Some(time.to_string());
        self.sent = false;
        Ok(())
    }

    /// Stores the number formatted for display.
    pub fn set_phone(&mut self, raw: &str) {
        self.phone = format_uk_phone(raw);
    }

    pub fn set_name(&mut self, name: &str) {
        self.name = name.to_string();
    }

    pub fn set_notes(&mut self, notes: &str) {
        self.notes = notes.to_string();
    }

    pub fn set_email(&mut self, email: &str) {
        self.email = email.to_string();
    }

    /// Merges a quick-pick note into the free-text notes.
    pub fn add_note_chip(&mut self, chip: &str) {
        self.notes = merge_note(&self.notes, chip);
    }

    pub fn phone_ok(&self) -> bool {
        is_phone_valid(&self.phone)
    }

    pub fn phone_hint(&self) -> Option<&'static str> {
        phone_hint(&self.phone)
    }

    pub fn end_time(&self) -> Option<String> {
        let service = self.service?;
        end_time(self.time.as_deref()?, service.mins)
    }

    pub fn is_step_ready(&self, step: Step) -> bool {
        match step {
            Step::Choose => self.barber.is_some() && self.service.is_some(),
            Step::Date => self.date >= self.today,
            Step::Time => self.time.is_some() && self.phone_ok(),
        }
    }

    pub fn current_step_ready(&self) -> bool {
        self.is_step_ready(self.step)
    }

    /// Moves to the next step when the current one is complete.
    pub fn advance(&mut self) -> bool {
        match self.step.next() {
            Some(next) if self.current_step_ready() => {
                self.step = next;
                true
            }
            _ => false,
        }
    }

    pub fn back(&mut self) -> bool {
        match self.step.previous() {
            Some(previous) => {
                self.step = previous;
                true
            }
            None => false,
        }
    }

    /// Jumps back to an earlier step, as from a summary chip.
    pub fn edit(&mut self, step: Step) {
        if step < self.step {
            self.step = step;
        }
    }

    pub fn primary_label(&self) -> &'static str {
        match self.step {
            Step::Choose => "Continue to date",
            Step::Date => "Continue to time",
            Step::Time if self.sending => "Sending…",
            Step::Time => "Confirm booking",
        }
    }

    pub fn primary_disabled(&self) -> bool {
        !self.current_step_ready() || (self.step == Step::Time && self.sending)
    }

    pub fn footer_help(&self) -> &'static str {
        match self.step {
            Step::Choose if !self.current_step_ready() => "Select barber + service",
            Step::Date if !self.current_step_ready() => "Pick a valid date",
            Step::Time if self.time.is_none() => "Pick a time",
            Step::Time if !self.phone_ok() => "Add phone to confirm",
            _ => "",
        }
    }

    pub fn next_hint(&self) -> &'static str {
        match self.step {
            Step::Choose => "Next: Pick a date",
            Step::Date => "Next: Pick a time",
            Step::Time => "Next: Confirm booking",
        }
    }

    /// "Confirm — £28" once the booking can be sent.
    pub fn confirm_label(&self) -> String {
        match self.service {
            Some(service) if self.is_step_ready(Step::Time) => {
                format!("Confirm — £{}", service.price)
            }
            _ => "Confirm".to_string(),
        }
    }

    pub fn service_benefit(&self) -> &'static str {
        self.service
            .map(|s| s.desc)
            .unwrap_or("Choose a service to continue.")
    }

    /// `Mason · Skin fade · Tue, 20 Oct · 10:00–10:50 · £28`, or empty until
    /// every part is chosen.
    pub fn summary_text(&self) -> String {
        let (Some(barber), Some(service), Some(time), Some(end)) =
            (self.barber, self.service, self.time.as_deref(), self.end_time())
        else {
            return String::new();
        };
        format!(
            "{} · {} · {} · {}–{} · £{}",
            barber.name,
            service.name,
            pretty_day_long(self.date),
            time,
            end,
            service.price
        )
    }

    pub fn summary_parts(&self) -> Vec<SummaryPart> {
        let (Some(barber), Some(service)) = (self.barber, self.service) else {
            return Vec::new();
        };
        let mut parts = vec![
            SummaryPart {
                label: barber.name.to_string(),
                step: Step::Choose,
            },
            SummaryPart {
                label: service.name.to_string(),
                step: Step::Choose,
            },
            SummaryPart {
                label: pretty_day_long(self.date),
                step: Step::Date,
            },
        ];
        if let (Some(time), Some(end)) = (self.time.as_deref(), self.end_time()) {
            parts.push(SummaryPart {
                label: format!("{time}–{end}"),
                step: Step::Time,
            });
        }
        parts
    }

    /// Progressive one-liner of what has been chosen so far, joined by " • ".
    pub fn subline_text(&self) -> String {
        let mut parts = Vec::new();
        if let Some(barber) = self.barber {
            parts.push(barber.name.to_string());
        }
        if let Some(service) = self.service {
            parts.push(format!("{} · £{}", service.name, service.price));
            parts.push(pretty_day_long(self.date));
            if let (Some(time), Some(end)) = (self.time.as_deref(), self.end_time()) {
                parts.push(format!("{time}–{end}"));
            }
        }
        parts.join(" • ")
    }

    /// The payload for `POST /booking`.
    pub fn to_request(&self) -> Result<BookingRequest, BookingError> {
        let service = self.service.ok_or(BookingError::MissingFields)?;
        let time = self.time.clone().ok_or(BookingError::MissingFields)?;
        if self.phone.trim().is_empty() {
            return Err(BookingError::MissingFields);
        }
        if !self.phone_ok() {
            return Err(BookingError::InvalidPhone);
        }

        let optional = |value: &str| {
            let value = value.trim();
            (!value.is_empty()).then(|| value.to_string())
        };

        Ok(BookingRequest {
            service: Some(ServiceSelection {
                key: Some(service.key.to_string()),
                name: service.name.to_string(),
                price: Some(service.price.into()),
                mins: Some(service.mins.into()),
            }),
            barber: self.barber.map(|b| BarberSelection {
                key: Some(b.key.to_string()),
                name: b.name.to_string(),
            }),
            date: crate::calendar::format_iso_date(self.date),
            end_time: end_time(&time, service.mins),
            time,
            phone: self.phone.trim().to_string(),
            name: optional(&self.name),
            notes: optional(&self.notes),
            email: optional(&self.email),
        })
    }

    pub fn begin_sending(&mut self) {
        self.sending = true;
        self.sent = false;
    }

    pub fn finish_sending(&mut self, sent: bool) {
        self.sending = false;
        self.sent = sent;
    }
}

/// Appends `chip` to `notes` unless it is already mentioned.
pub fn merge_note(notes: &str, chip: &str) -> String {
    let current = notes.trim();
    if current.is_empty() {
        return chip.to_string();
    }
    if current.to_lowercase().contains(&chip.to_lowercase()) {
        return notes.to_string();
    }
    let dot = if current.ends_with('.') { "" } else { "." };
    format!("{current}{dot} {chip}")
}
