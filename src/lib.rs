use {
    crate::{config::Configuration, state::AppState},
    std::sync::Arc,
    tokio::sync::broadcast,
    tracing::info,
};

pub mod client;
pub mod config;
pub mod error;
pub mod relay;
pub mod rpc;
pub mod services;
pub mod state;

pub use error::Result;

pub async fn bootstrap(shutdown: broadcast::Receiver<()>, config: Configuration) -> Result<()> {
    info!(
        "Relaying from RPC host {} (default port {})",
        config.rpc_host, config.default_rpc_port
    );

    let state = Arc::new(AppState::new(config)?);

    services::public_http_server::start(
        state.config.bind_ip,
        state.config.port,
        state.clone(),
        shutdown,
    )
    .await?;

    info!("Public HTTP server terminating");
    Ok(())
}
