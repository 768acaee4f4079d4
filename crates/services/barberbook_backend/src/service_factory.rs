// --- File: crates/services/barberbook_backend/src/service_factory.rs ---
//! Service factory implementation.
//!
//! Decides at startup which outbound services the backend hands to its
//! routes. A service that is compiled out, switched off, or missing its
//! credentials is simply absent; the routes report that per request.
use barberbook_common::services::{BoxedError, NotificationService, ServiceFactory};
use barberbook_config::AppConfig;
use std::sync::Arc;
#[allow(unused_imports)] // used only with the resend feature
use tracing::{info, warn};

#[cfg(feature = "resend")]
use {
    barberbook_common::{is_resend_enabled, services::BoxFuture, services::NotificationResult},
    barberbook_resend::ResendNotificationService,
};

/// Erases `ResendError` so the service fits behind `ServiceFactory`.
#[cfg(feature = "resend")]
struct BoxedResendService {
    inner: ResendNotificationService,
}

#[cfg(feature = "resend")]
impl NotificationService for BoxedResendService {
    type Error = BoxedError;

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
        let inner = &self.inner;

        Box::pin(async move {
            inner
                .send_email(&to, &subject, &body, is_html)
                .await
                .map_err(BoxedError::new)
        })
    }
}

pub struct BarberbookServiceFactory {
    config: Arc<AppConfig>,
    notification_service: Option<Arc<dyn NotificationService<Error = BoxedError>>>,
}

impl BarberbookServiceFactory {
    /// Create a new service factory from the loaded configuration.
    pub fn new(config: Arc<AppConfig>) -> Self {
        #[allow(unused_mut)]
        let mut factory = Self {
            config: config.clone(),
            notification_service: None,
        };

        #[cfg(feature = "resend")]
        {
            if is_resend_enabled(&config) {
                match ResendNotificationService::from_config(&config) {
                    Ok(service) => {
                        info!("Resend relay enabled, sending as {}", service.from_address());
                        factory.notification_service =
                            Some(Arc::new(BoxedResendService { inner: service }));
                    }
                    Err(e) => warn!("Resend relay disabled: {}", e),
                }
            } else {
                info!("Resend relay is switched off in config");
            }
        }

        factory
    }

    /// Replaces the notification service, e.g. with a mock.
    pub fn with_notification_service(
        mut self,
        service: Arc<dyn NotificationService<Error = BoxedError>>,
    ) -> Self {
        self.notification_service = Some(service);
        self
    }

    pub fn config(&self) -> &Arc<AppConfig> {
        &self.config
    }
}

impl ServiceFactory for BarberbookServiceFactory {
    fn notification_service(&self) -> Option<Arc<dyn NotificationService<Error = BoxedError>>> {
        self.notification_service.clone()
    }
}
