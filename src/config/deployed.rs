use {
    super::Configuration,
    crate::{error::NodeRelayError, rpc::RpcCredentials},
    serde::Deserialize,
    std::net::{IpAddr, Ipv4Addr},
};

// Configuration entrypoint for a deployed service

#[derive(Deserialize, Debug)]
pub struct DeployedConfiguration {
    pub rpc_user: String,
    pub rpc_password: String,

    #[serde(default = "super::default_rpc_host")]
    pub rpc_host: IpAddr,
    #[serde(default = "super::default_rpc_port")]
    pub default_rpc_port: u16,
    #[serde(default = "default_bind_ip")]
    pub bind_ip: IpAddr,
    #[serde(default = "super::default_port")]
    pub port: u16,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_bind_ip() -> IpAddr {
    IpAddr::V4(Ipv4Addr::UNSPECIFIED)
}

fn default_log_level() -> String {
    "WARN,node_info_relay=INFO".to_string()
}

pub fn get_configuration() -> Result<Configuration, NodeRelayError> {
    let config = envy::from_env::<DeployedConfiguration>()?;

    Ok(Configuration {
        bind_ip: config.bind_ip,
        port: config.port,
        log_level: config.log_level,
        rpc_host: config.rpc_host,
        default_rpc_port: config.default_rpc_port,
        rpc_credentials: RpcCredentials::new(config.rpc_user, config.rpc_password),
    })
}
