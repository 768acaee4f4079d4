// --- File: crates/barberbook_common/src/error.rs ---
use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// Error shared by every Barberbook crate.
///
/// Feature crates keep their own enums (`BookingError`, `ResendError`) and
/// convert into this one, so read-only endpoints all render failures as
/// `{"error": {"message", "code"}}`.
#[derive(Error, Debug)]
pub enum BarberbookError {
    #[error("HTTP request failed: {0}")]
    HttpError(String),

    #[error("Failed to parse data: {0}")]
    ParseError(String),

    /// A setting is missing or unusable; fixed by redeploying, not by the caller.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    /// An outbound provider (e-mail relay) refused the call.
    #[error("External service error: {service_name} - {message}")]
    ExternalServiceError {
        service_name: String,
        message: String,
    },

    #[error("Not found: {0}")]
    NotFoundError(String),

    /// The request clashes with current state, e.g. a time no longer offered.
    #[error("Conflict: {0}")]
    ConflictError(String),

    #[error("Timeout: {0}")]
    TimeoutError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Maps an error onto the HTTP status it should be answered with.
pub trait HttpStatusCode {
    fn status_code(&self) -> u16;
}

impl HttpStatusCode for BarberbookError {
    fn status_code(&self) -> u16 {
        match self {
            BarberbookError::ParseError(_) | BarberbookError::ValidationError(_) => 400,
            BarberbookError::NotFoundError(_) => 404,
            BarberbookError::ConflictError(_) => 409,
            BarberbookError::ExternalServiceError { .. } => 502,
            BarberbookError::TimeoutError(_) => 504,
            BarberbookError::HttpError(_)
            | BarberbookError::ConfigError(_)
            | BarberbookError::InternalError(_) => 500,
        }
    }
}

/// Body of an error response.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ErrorEnvelope {
    pub error: ErrorBody,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ErrorBody {
    pub message: String,
    pub code: u16,
}

impl BarberbookError {
    pub fn envelope(&self) -> ErrorEnvelope {
        ErrorEnvelope {
            error: ErrorBody {
                message: self.to_string(),
                code: self.status_code(),
            },
        }
    }
}

/// Attaches a short description of what was being done to a foreign error.
pub trait Context<T> {
    fn context<C>(self, context: C) -> Result<T, BarberbookError>
    where
        C: fmt::Display;

    fn with_context<C, F>(self, f: F) -> Result<T, BarberbookError>
    where
        C: fmt::Display,
        F: FnOnce() -> C;
}

impl<T, E: std::error::Error> Context<T> for Result<T, E> {
    fn context<C>(self, context: C) -> Result<T, BarberbookError>
    where
        C: fmt::Display,
    {
        self.map_err(|error| BarberbookError::InternalError(format!("{context}: {error}")))
    }

    fn with_context<C, F>(self, f: F) -> Result<T, BarberbookError>
    where
        C: fmt::Display,
        F: FnOnce() -> C,
    {
        self.map_err(|error| BarberbookError::InternalError(format!("{}: {error}", f())))
    }
}

impl From<reqwest::Error> for BarberbookError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            BarberbookError::TimeoutError(err.to_string())
        } else {
            BarberbookError::HttpError(err.to_string())
        }
    }
}

impl From<serde_json::Error> for BarberbookError {
    fn from(err: serde_json::Error) -> Self {
        BarberbookError::ParseError(err.to_string())
    }
}
