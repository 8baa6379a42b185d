// gitpanel services
// Services provide the core functionality: fetching provider data, rendering fragments, settings.

pub mod provider_client;
pub mod renderer;
pub mod settings_engine;
