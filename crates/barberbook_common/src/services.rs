// --- File: crates/barberbook_common/src/services.rs ---
//! Service abstractions for external services.
//!
//! Handlers talk to outbound providers through these traits so the provider
//! can be swapped, or mocked in tests, without touching request code.

use serde::{Deserialize, Serialize};
use std::error::Error as StdError;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::error::HttpStatusCode;

/// Type alias for a boxed future that returns a Result
pub type BoxFuture<'a, T, E> = Pin<Box<dyn Future<Output = Result<T, E>> + Send + 'a>>;

/// A type-erased error that still knows which HTTP status it maps to.
#[derive(Debug)]
pub struct BoxedError {
    pub status_code: u16,
    pub inner: Box<dyn StdError + Send + Sync>,
}

impl BoxedError {
    /// Erase `err`, keeping its status code.
    pub fn new<E>(err: E) -> Self
    where
        E: StdError + HttpStatusCode + Send + Sync + 'static,
    {
        Self {
            status_code: err.status_code(),
            inner: Box::new(err),
        }
    }
}

impl fmt::Display for BoxedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.inner)
    }
}

impl StdError for BoxedError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.inner.source()
    }
}

impl HttpStatusCode for BoxedError {
    fn status_code(&self) -> u16 {
        self.status_code
    }
}

/// A trait for notification service operations.
///
/// Only e-mail is needed: a booking request becomes one message to the shop.
pub trait NotificationService: Send + Sync {
    /// Error type returned by notification service operations.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Send an email notification.
    fn send_email(
        &self,
        to: &str,
        subject: &str,
        body: &str,
        is_html: bool,
    ) -> BoxFuture<'_, NotificationResult, Self::Error>;
}

/// A factory for creating service instances.
pub trait ServiceFactory: Send + Sync {
    /// Get a notification service instance, if one is configured.
    fn notification_service(&self) -> Option<Arc<dyn NotificationService<Error = BoxedError>>>;
}

/// Represents the result of a notification operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationResult {
    /// The provider's ID of the notification.
    pub id: String,
    /// The status of the notification.
    pub status: String,
}

/// In-memory implementations for tests and local runs.
pub mod mock {
    use super::*;
    use std::sync::Mutex;

    /// One message captured by [`MockNotificationService`].
    #[derive(Debug, Clone, PartialEq)]
    pub struct SentEmail {
        pub to: String,
        pub subject: String,
        pub body: String,
        pub is_html: bool,
    }

    #[derive(Debug, thiserror::Error)]
    #[error("{message}")]
    pub struct MockError {
        pub status_code: u16,
        pub message: String,
    }

    impl HttpStatusCode for MockError {
        fn status_code(&self) -> u16 {
            self.status_code
        }
    }

    /// Records every e-mail instead of sending it.
    #[derive(Default)]
    pub struct MockNotificationService {
        sent: Mutex<Vec<SentEmail>>,
        failure: Option<(u16, String)>,
    }

    impl MockNotificationService {
        pub fn new() -> Self {
            Self::default()
        }

        /// A service whose every send fails with `status_code` and `message`.
        pub fn failing(status_code: u16, message: &str) -> Self {
            Self {
                sent: Mutex::new(Vec::new()),
                failure: Some((status_code, message.to_string())),
            }
        }

        pub fn sent(&self) -> Vec<SentEmail> {
            self.sent.lock().map(|s| s.clone()).unwrap_or_default()
        }
    }

    impl NotificationService for MockNotificationService {
        type Error = BoxedError;

        fn send_email(
            &self,
            to: &str,
            subject: &str,
            body: &str,
            is_html: bool,
        ) -> BoxFuture<'_, NotificationResult, Self::Error> {
            let email = SentEmail {
                to: to.to_string(),
                subject: subject.to_string(),
                body: body.to_string(),
                is_html,
            };

            Box::pin(async move {
                if let Some((status_code, message)) = &self.failure {
                    return Err(BoxedError::new(MockError {
                        status_code: *status_code,
                        message: message.clone(),
                    }));
                }
                let mut sent = self.sent.lock().map_err(|e| {
                    BoxedError::new(MockError {
                        status_code: 500,
                        message: e.to_string(),
                    })
                })?;
                sent.push(email);
                Ok(NotificationResult {
                    id: format!("mock-{}", sent.len()),
                    status: "sent".to_string(),
                })
            })
        }
    }

    /// A factory handing out a fixed (possibly absent) notification service.
    pub struct MockServiceFactory {
        pub notification: Option<Arc<dyn NotificationService<Error = BoxedError>>>,
    }

    impl ServiceFactory for MockServiceFactory {
        fn notification_service(&self) -> Option<Arc<dyn NotificationService<Error = BoxedError>>> {
            self.notification.clone()
        }
    }
}
