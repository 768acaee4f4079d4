// --- File: crates/barberbook_resend/src/lib.rs ---
pub mod service;

pub use service::{ResendError, ResendNotificationService};
