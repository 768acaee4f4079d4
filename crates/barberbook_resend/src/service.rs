// --- File: crates/barberbook_resend/src/service.rs ---
use barberbook_common::error::{BarberbookError, HttpStatusCode};
use barberbook_common::services::{BoxFuture, NotificationResult, NotificationService};
use barberbook_config::AppConfig;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, error, info};

/// Resend-specific error types.
#[derive(Error, Debug)]
pub enum ResendError {
    /// The request never got an answer.
    #[error("{0}")]
    RequestError(#[from] reqwest::Error),

    /// Resend answered with a non-2xx status.
    #[error("Resend error {status_code}: {message}")]
    ApiError { status_code: u16, message: String },

    /// Missing or incomplete Resend configuration
    #[error("Missing {0}")]
    ConfigError(&'static str),
}

impl HttpStatusCode for ResendError {
    fn status_code(&self) -> u16 {
        match self {
            ResendError::RequestError(e) if e.is_timeout() => 504,
            ResendError::RequestError(_) => 500,
            ResendError::ApiError { .. } => 502,
            ResendError::ConfigError(_) => 500,
        }
    }
}

impl From<ResendError> for BarberbookError {
    fn from(err: ResendError) -> Self {
        match err {
            ResendError::RequestError(e) => e.into(),
            ResendError::ApiError { .. } => BarberbookError::ExternalServiceError {
                service_name: "Resend".to_string(),
                message: err.to_string(),
            },
            ResendError::ConfigError(_) => BarberbookError::ConfigError(err.to_string()),
        }
    }
}

#[derive(Serialize, Debug)]
struct SendEmailRequest<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    html: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<&'a str>,
}

#[derive(Deserialize, Debug)]
struct SendEmailResponse {
    #[serde(default)]
    id: Option<String>,
}

/// Sends e-mail through `POST {base_url}/emails`.
pub struct ResendNotificationService {
    api_key: String,
    from: String,
    base_url: String,
    http: Client,
}

impl ResendNotificationService {
    pub fn new(api_key: impl Into<String>, from: impl Into<String>, base_url: &str) -> Self {
        Self {
            api_key: api_key.into(),
            from: from.into(),
            base_url: base_url.trim_end_matches('/').to_string(),
            http: (*barberbook_common::HTTP_CLIENT).clone(),
        }
    }

    /// Reads the key and base URL from `resend`, the sender from `booking`.
    pub fn from_config(config: &AppConfig) -> Result<Self, ResendError> {
        let resend = config
            .resend
            .as_ref()
            .ok_or(ResendError::ConfigError("RESEND_API_KEY"))?;
        let api_key = resend
            .api_key()
            .ok_or(ResendError::ConfigError("RESEND_API_KEY"))?;
        Ok(Self::new(
            api_key,
            config.booking.from_email(),
            resend.base_url(),
        ))
    }

    pub fn with_client(mut self, http: Client) -> Self {
        self.http = http;
        self
    }

    pub fn from_address(&self) -> &str {
        &self.from
    }

    async fn send(
        &self,
        to: &str,
        subject: &str,
        body: &str,
        is_html: bool,
    ) -> Result<NotificationResult, ResendError> {
        let url = format!("{}/emails", self.base_url);
        let payload = SendEmailRequest {
            from: &self.from,
            to,
            subject,
            html: is_html.then_some(body),
            text: (!is_html).then_some(body),
        };
        debug!("POST {} subject={:?}", url, subject);

        let resp = self
            .http
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await?;

        let status = resp.status();
        let text = resp.text().await.unwrap_or_default();

        if !status.is_success() {
            error!("Resend returned {}: {}", status, text);
            let message = if text.trim().is_empty() {
                status.canonical_reason().unwrap_or("").to_string()
            } else {
                text
            };
            return Err(ResendError::ApiError {
                status_code: status.as_u16(),
                message,
            });
        }

        let id = serde_json::from_str::<SendEmailResponse>(&text)
            .ok()
            .and_then(|r| r.id)
            .unwrap_or_default();
        info!("Resend accepted e-mail {}", id);
        Ok(NotificationResult {
            id,
            status: "sent".to_string(),
        })
    }
}

impl NotificationService for ResendNotificationService {
    type Error = ResendError;

    fn send_email(
        &self,
        to: &str,
        subject: &str,
        body: &str,
        is_html: bool,
    ) -> BoxFuture<'_, NotificationResult, Self::Error> {
        let to = to.to_string();
        let subject = subject.to_string();
        let body = body.to_string();

        Box::pin(async move { self.send(&to, &subject, &body, is_html).await })
    }
}
