use {
    super::Configuration,
    crate::{error::NodeRelayError, rpc::RpcCredentials},
    dotenvy::dotenv,
    serde::Deserialize,
    std::net::{IpAddr, Ipv4Addr},
};

// Configuration entrypoint for `cargo run`

#[derive(Deserialize, Debug)]
pub struct LocalConfiguration {
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
    IpAddr::V4(Ipv4Addr::LOCALHOST)
}

fn default_log_level() -> String {
    "WARN,node_info_relay=DEBUG".to_string()
}

impl From<LocalConfiguration> for Configuration {
    fn from(config: LocalConfiguration) -> Self {
        Configuration {
            bind_ip: config.bind_ip,
            port: config.port,
            log_level: config.log_level,
            rpc_host: config.rpc_host,
            default_rpc_port: config.default_rpc_port,
            rpc_credentials: RpcCredentials::new(config.rpc_user, config.rpc_password),
        }
    }
}

pub fn get_configuration() -> Result<Configuration, NodeRelayError> {
    load_dot_env()?;
    let config = envy::from_env::<LocalConfiguration>()?;
    Ok(config.into())
}

fn load_dot_env() -> dotenvy::Result<()> {
    match dotenv() {
        Ok(_) => Ok(()),
        Err(e) if e.not_found() => Ok(()),
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn defaults() {
        let config: Configuration = envy::from_iter::<_, LocalConfiguration>(vars(&[
            ("RPC_USER", "relay-user"),
            ("RPC_PASSWORD", "relay-password"),
        ]))
        .unwrap()
        .into();

        assert_eq!(config.rpc_credentials.username, "relay-user");
        assert_eq!(config.rpc_credentials.password, "relay-password");
        assert_eq!(config.rpc_host, IpAddr::V4(Ipv4Addr::LOCALHOST));
        assert_eq!(config.default_rpc_port, 51475);
        assert_eq!(config.bind_ip, IpAddr::V4(Ipv4Addr::LOCALHOST));
        assert_eq!(config.port, 3000);
        assert_eq!(config.log_level, "WARN,node_info_relay=DEBUG");
    }

    #[test]
    fn overrides() {
        let config: Configuration = envy::from_iter::<_, LocalConfiguration>(vars(&[
            ("RPC_USER", "relay-user"),
            ("RPC_PASSWORD", "relay-password"),
            ("RPC_HOST", "10.1.2.3"),
            ("DEFAULT_RPC_PORT", "9998"),
            ("PORT", "8080"),
        ]))
        .unwrap()
        .into();

        assert_eq!(config.rpc_host, "10.1.2.3".parse::<IpAddr>().unwrap());
        assert_eq!(config.default_rpc_port, 9998);
        assert_eq!(config.port, 8080);
    }

    #[test]
    fn credentials_are_required() {
        assert!(
            envy::from_iter::<_, LocalConfiguration>(vars(&[("RPC_USER", "relay-user")])).is_err()
        );
    }
}
