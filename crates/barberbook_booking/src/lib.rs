// --- File: crates/barberbook_booking/src/lib.rs ---
// Declare modules within this crate
pub mod calendar;
pub mod catalog;
pub mod clock;
pub mod doc;
pub mod draft;
pub mod handlers;
pub mod logic;
#[cfg(test)]
mod logic_test;
pub mod phone;
pub mod routes;
pub mod slots;
#[cfg(test)]
mod slots_proptest;
pub mod submit;
pub mod time_of_day;

pub use routes::{router, routes};
