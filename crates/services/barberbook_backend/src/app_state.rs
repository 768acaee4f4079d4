// --- File: crates/services/barberbook_backend/src/app_state.rs ---
use std::sync::Arc;

use barberbook_common::services::ServiceFactory;
use barberbook_config::AppConfig;

use crate::service_factory::BarberbookServiceFactory;

/// Everything the routers are built from.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub service_factory: Arc<dyn ServiceFactory>,
}

impl AppState {
    /// State with the services the configuration enables.
    pub fn new(config: Arc<AppConfig>) -> Self {
        let service_factory = Arc::new(BarberbookServiceFactory::new(config.clone()));
        Self {
            config,
            service_factory,
        }
    }

    /// State over an explicit factory; tests pass mocks here.
    pub fn with_service_factory(
        config: Arc<AppConfig>,
        service_factory: Arc<dyn ServiceFactory>,
    ) -> Self {
        Self {
            config,
            service_factory,
        }
    }
}
