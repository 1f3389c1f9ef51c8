//! Serve Command
//!
//! Runs the HTTP service with the configured provider.

use tracing::info;

use crate::ai::create_provider;
use crate::config::ConfigLoader;
use crate::server::{self, AppState};
use crate::types::Result;

pub async fn run(host: Option<String>, port: Option<u16>) -> Result<()> {
    let mut config = ConfigLoader::load()?;
    if let Some(host) = host {
        config.server.host = host;
    }
    if let Some(port) = port {
        config.server.port = port;
    }
    config.validate()?;

    let provider = create_provider(&config.llm.to_provider_config())?;
    info!(
        "Using provider {} (model: {})",
        provider.name(),
        provider.model()
    );

    server::serve(AppState::new(provider, config.server)).await
}
