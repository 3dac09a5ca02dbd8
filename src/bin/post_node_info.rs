use {
    clap::Parser,
    node_info_relay::{
        config::get_configuration,
        relay::{parse_post_url, NodeInfoRelay, RelayRequest},
        Result,
    },
    serde_json::Value,
    std::process::ExitCode,
    url::Url,
};

/// Get node info from the local daemon and post it to a URL.
#[derive(Debug, Parser)]
struct Arguments {
    /// The ticker symbol of the coin (e.g., SAPP).
    ticker: String,
    /// The URL to post the node data to.
    #[arg(long = "posturl", value_parser = parse_post_url)]
    post_url: Url,
    /// The JSON-RPC port of the local daemon. Defaults to DEFAULT_RPC_PORT (51475).
    #[arg(long = "rpcport")]
    rpc_port: Option<u16>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let arguments = Arguments::parse();

    match run(arguments).await {
        Ok(response) => {
            println!("{response}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(arguments: Arguments) -> Result<Value> {
    let config = get_configuration()?;

    // stdout is reserved for the destination's response
    tracing_subscriber::fmt()
        .with_env_filter(&config.log_level)
        .with_writer(std::io::stderr)
        .with_ansi(std::env::var("ANSI_LOGS").is_ok())
        .init();

    let relay = NodeInfoRelay::new(&config.rpc_credentials, config.rpc_host)?;
    let request = arguments.into_request(config.default_rpc_port);

    Ok(relay.relay(&request).await?)
}

impl Arguments {
    fn into_request(self, default_rpc_port: u16) -> RelayRequest {
        RelayRequest {
            ticker: self.ticker,
            post_url: self.post_url,
            rpc_port: self.rpc_port.unwrap_or(default_rpc_port),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEFAULT_RPC_PORT: u16 = 51475;

    #[test]
    fn posturl_is_required() {
        let error = Arguments::try_parse_from(["post-node-info", "SAPP"]).unwrap_err();
        assert_eq!(
            error.kind(),
            clap::error::ErrorKind::MissingRequiredArgument
        );
    }

    #[test]
    fn ticker_is_required() {
        let error = Arguments::try_parse_from([
            "post-node-info",
            "--posturl",
            "https://monitor.example.com/node",
        ])
        .unwrap_err();
        assert_eq!(
            error.kind(),
            clap::error::ErrorKind::MissingRequiredArgument
        );
    }

    #[test]
    fn posturl_must_be_http() {
        for post_url in ["ftp://monitor.example.com/node", "/node", "not a url"] {
            let error =
                Arguments::try_parse_from(["post-node-info", "SAPP", "--posturl", post_url])
                    .unwrap_err();
            assert_eq!(error.kind(), clap::error::ErrorKind::ValueValidation);
        }
    }

    #[test]
    fn rpcport_must_be_a_port() {
        for rpc_port in ["not-a-port", "70000"] {
            let result = Arguments::try_parse_from([
                "post-node-info",
                "SAPP",
                "--posturl",
                "https://monitor.example.com/node",
                "--rpcport",
                rpc_port,
            ]);
            assert!(result.is_err(), "{rpc_port} was accepted");
        }
    }

    #[test]
    fn omitted_rpcport_uses_default() {
        let arguments = Arguments::try_parse_from([
            "post-node-info",
            "SAPP",
            "--posturl",
            "https://monitor.example.com/node",
        ])
        .unwrap();
        assert_eq!(arguments.rpc_port, None);

        let request = arguments.into_request(DEFAULT_RPC_PORT);
        assert_eq!(request.ticker, "SAPP");
        assert_eq!(request.post_url.as_str(), "https://monitor.example.com/node");
        assert_eq!(request.rpc_port, DEFAULT_RPC_PORT);
    }

    #[test]
    fn explicit_rpcport_wins() {
        let arguments = Arguments::try_parse_from([
            "post-node-info",
            "SAPP",
            "--posturl",
            "http://127.0.0.1:8080/node",
            "--rpcport",
            "12345",
        ])
        .unwrap();
        assert_eq!(arguments.rpc_port, Some(12345));
        assert_eq!(arguments.into_request(DEFAULT_RPC_PORT).rpc_port, 12345);
    }
}
