use {
    crate::{config::Configuration, error::Result, relay::NodeInfoRelay},
    build_info::BuildInfo,
};

pub struct AppState {
    pub config: Configuration,
    pub build_info: BuildInfo,
    pub relay: NodeInfoRelay,
}

build_info::build_info!(fn build_info);

impl AppState {
    pub fn new(config: Configuration) -> Result<AppState> {
        let relay = NodeInfoRelay::new(&config.rpc_credentials, config.rpc_host)?;

        Ok(AppState {
            config,
            build_info: build_info().clone(),
            relay,
        })
    }
}
