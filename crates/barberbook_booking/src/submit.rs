// --- File: crates/barberbook_booking/src/submit.rs ---
//! Client side of `POST /booking`.

use std::sync::atomic::{AtomicBool, Ordering};

use reqwest::Client;
use tracing::{info, warn};

use crate::draft::BookingDraft;
use crate::logic::{BookingError, BookingRequest, BookingResponse};

/// Shown when the relay could not confirm delivery.
pub const DEMO_SUCCESS_MESSAGE: &str =
    "Request received. This demo does not book real appointments; the shop will follow up.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The relay accepted the lead.
    Sent,
    /// The relay failed; the customer still sees a success message.
    DemoSuccess { reason: String },
    /// Another submission from this client is still in flight.
    Busy,
}

impl SubmitOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, SubmitOutcome::Sent | SubmitOutcome::DemoSuccess { .. })
    }
}

/// Posts booking requests one at a time.
pub struct BookingClient {
    endpoint: String,
    http: Client,
    busy: AtomicBool,
}

struct BusyGuard<'a>(&'a AtomicBool);

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl BookingClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self::with_client(endpoint, (*barberbook_common::HTTP_CLIENT).clone())
    }

    pub fn with_client(endpoint: impl Into<String>, http: Client) -> Self {
        Self {
            endpoint: endpoint.into(),
            http,
            busy: AtomicBool::new(false),
        }
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    pub async fn submit(&self, request: &BookingRequest) -> SubmitOutcome {
        if self
            .busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return SubmitOutcome::Busy;
        }
        let _guard = BusyGuard(&self.busy);

        let response = match self.http.post(&self.endpoint).json(request).send().await {
            Ok(response) => response,
            Err(e) => {
                warn!("booking request failed: {}", e);
                return SubmitOutcome::DemoSuccess {
                    reason: e.to_string(),
                };
            }
        };

        let status = response.status();
        match response.json::<BookingResponse>().await {
            Ok(BookingResponse { ok: true, .. }) => {
                info!("booking relayed");
                SubmitOutcome::Sent
            }
            Ok(BookingResponse { error, .. }) => {
                let reason = error.unwrap_or_else(|| status.to_string());
                warn!("booking relay answered {}: {}", status, reason);
                SubmitOutcome::DemoSuccess { reason }
            }
            Err(e) => {
                warn!("unreadable booking response ({}): {}", status, e);
                SubmitOutcome::DemoSuccess {
                    reason: e.to_string(),
                }
            }
        }
    }

    /// Sends `draft`, keeping its sending and sent flags current.
    pub async fn submit_draft(
        &self,
        draft: &mut BookingDraft,
    ) -> Result<SubmitOutcome, BookingError> {
        let request = draft.to_request()?;
        draft.begin_sending();
        let outcome = self.submit(&request).await;
        draft.finish_sending(outcome.is_success());
        Ok(outcome)
    }
}
