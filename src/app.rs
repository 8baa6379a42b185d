//! App Core for gitpanel.
//!
//! Central struct wiring settings, the provider data client and the page state.

use futures::stream::{FuturesUnordered, StreamExt};

use crate::managers::dashboard::Dashboard;
use crate::managers::tab_router::TabRouter;
use crate::services::provider_client::ProviderDataClient;
use crate::services::renderer::Renderer;
use crate::services::settings_engine::{SettingsEngine, SettingsEngineTrait};
use crate::types::provider::{Identity, Provider};
use crate::types::settings::ClientSettings;
use crate::types::view::ContainerUpdate;

/// Central application struct.
pub struct App {
    pub settings: ClientSettings,
    pub client: ProviderDataClient,
    pub dashboard: Dashboard,
}

impl App {
    /// Loads settings from `config_path` (or the platform default path),
    /// applies environment overrides and builds the app.
    pub fn new(config_path: Option<String>) -> Result<Self, Box<dyn std::error::Error>> {
        let mut engine = SettingsEngine::new(config_path);
        engine.load()?;
        engine.apply_env_overrides()?;
        log::debug!("settings loaded from {}", engine.get_config_path());
        Self::with_settings(engine.get_settings().clone())
    }

    pub fn with_settings(settings: ClientSettings) -> Result<Self, Box<dyn std::error::Error>> {
        settings.validate()?;
        let client = ProviderDataClient::new(&settings)?;
        let router = TabRouter::from_settings(&settings)?;
        let dashboard = Dashboard::new(router, Renderer::new());

        log::info!("gitpanel ready, backend {}", client.base_url());
        Ok(Self {
            settings,
            client,
            dashboard,
        })
    }

    /// Submits a provider form and applies each of its three fetches as soon
    /// as it settles. Returns the updates in completion order.
    pub async fn submit(&mut self, identity: Identity, state: Option<&str>) -> Vec<ContainerUpdate> {
        let pending = self.dashboard.submit(identity, state);
        let client = self.client.clone();

        let mut in_flight: FuturesUnordered<_> =
            pending.into_iter().map(|p| p.run(&client)).collect();
        let mut updates = Vec::new();
        while let Some(outcome) = in_flight.next().await {
            if let Some(update) = self.dashboard.apply(outcome) {
                updates.push(update);
            }
        }
        updates
    }

    /// Branch filter change; `None` when no repository has been submitted yet.
    pub async fn change_branch(
        &mut self,
        provider: Provider,
        branch: Option<&str>,
    ) -> Option<ContainerUpdate> {
        let pending = self.dashboard.change_branch(provider, branch)?;
        let outcome = pending.run(&self.client).await;
        self.dashboard.apply(outcome)
    }

    /// State filter change; `None` when no repository has been submitted yet.
    pub async fn change_state(&mut self, provider: Provider, state: &str) -> Option<ContainerUpdate> {
        let pending = self.dashboard.change_state(provider, state)?;
        let outcome = pending.run(&self.client).await;
        self.dashboard.apply(outcome)
    }
}
