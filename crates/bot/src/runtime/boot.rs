//! Boot — logging init, config load, Docker connection, state creation.

use std::sync::Arc;

use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::conf::BotConfig;
use crate::docker::client::DockerClient;
use crate::state::{BotState, SharedState};

/// Initialise the tracing / logging subsystem.
pub fn init_logging() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "dockhand=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Load config, connect to Docker, and build shared state.
///
/// Returns `(SharedState, BotConfig)` on success. A missing token or an
/// unreachable Docker daemon is fatal here, before the gateway connects.
pub async fn boot() -> Result<(SharedState, BotConfig), Box<dyn std::error::Error>> {
    info!("Starting Dockhand v0.0.1");

    let config = BotConfig::load()?;
    config.validate().map_err(|e| {
        error!("Invalid configuration: {}", e);
        e
    })?;

    if config.open_to_everyone() {
        warn!("AUTHORIZED_USERS is empty; commands are open to every user");
    }
    if config.channel_id == 0 {
        warn!("DISCORD_CHANNEL_ID is 0; commands are accepted from any channel and event notifications stay off");
    }
    if !config.monitored_containers.is_empty() {
        info!(
            "Monitoring {} container(s): {}",
            config.monitored_containers.len(),
            config.monitored_containers.join(", ")
        );
    }

    info!(
        "Connecting to Docker daemon at: {}",
        if config.docker_socket.is_empty() {
            "default socket"
        } else {
            &config.docker_socket
        }
    );

    let docker = DockerClient::new(&config.docker_socket).map_err(|e| {
        error!("Failed to connect to Docker: {}", e);
        e
    })?;

    info!("Successfully connected to Docker daemon");

    let state = Arc::new(BotState::new(Arc::new(docker), config.clone()));
    info!("Initialized shared application state");

    Ok((state, config))
}
