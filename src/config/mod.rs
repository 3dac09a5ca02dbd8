use {
    crate::{error::NodeRelayError, rpc::RpcCredentials},
    std::{env, net::IpAddr},
};

mod deployed;
mod local;

#[derive(Debug, Clone)]
pub struct Configuration {
    pub bind_ip: IpAddr,
    pub port: u16,
    pub log_level: String,
    /// Address of the blockchain daemon's JSON-RPC listener
    pub rpc_host: IpAddr,
    /// Used when a relay request doesn't name a port
    pub default_rpc_port: u16,
    pub rpc_credentials: RpcCredentials,
}

pub fn get_configuration() -> Result<Configuration, NodeRelayError> {
    if env::var("ENVIRONMENT") == Ok("DEPLOYED".to_owned()) {
        deployed::get_configuration()
    } else {
        local::get_configuration()
    }
}

fn default_rpc_host() -> IpAddr {
    IpAddr::V4(std::net::Ipv4Addr::LOCALHOST)
}

fn default_rpc_port() -> u16 {
    crate::relay::DEFAULT_RPC_PORT
}

fn default_port() -> u16 {
    3000
}
