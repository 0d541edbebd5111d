use std::sync::Arc;

use axum::Router;
use frontend_settings_sdk::FrontendSettingsApi;
use tracing::info;

use crate::api::rest::routes;
use crate::config::FrontendSettingsConfig;
use crate::domain::service::Service;
use crate::infra::storage::{InMemoryRepository, seed};
use crate::local_client::LocalClient;

/// Wires the settings store: repository, domain service, REST routes and the
/// in-process client.
pub struct FrontendSettingsModule {
    config: FrontendSettingsConfig,
    service: Arc<Service>,
}

impl FrontendSettingsModule {
    /// Build the module and seed it from `config.seed_dir` when set.
    ///
    /// # Errors
    /// Returns an error if a seed file is unreadable or malformed.
    pub async fn new(config: FrontendSettingsConfig) -> anyhow::Result<Self> {
        info!("Initializing frontend settings module");

        let repo = Arc::new(InMemoryRepository::new());
        let service = Arc::new(Service::new(repo));

        if let Some(dir) = &config.seed_dir {
            let seeded = seed::seed_from_dir(&service, dir).await?;
            info!(seed_dir = %dir.display(), seeded, "Seed directory loaded");
        }

        info!("Frontend settings module initialized");
        Ok(Self { config, service })
    }

    #[must_use]
    pub fn service(&self) -> Arc<Service> {
        Arc::clone(&self.service)
    }

    /// Mount the REST routes onto `router`.
    pub fn register_rest(&self, router: Router) -> Router {
        info!("Registering frontend settings REST routes");
        routes::register_routes(router, self.service(), self.config.max_body_bytes)
    }

    /// A client bound directly to this module's service.
    #[must_use]
    pub fn client(&self) -> Arc<dyn FrontendSettingsApi> {
        Arc::new(LocalClient::new(self.service()))
    }
}
