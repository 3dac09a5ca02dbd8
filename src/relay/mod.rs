use {
    crate::{
        error::NodeRelayError,
        rpc::{RpcClient, RpcCredentials, GET_BLOCK_HASH_METHOD, GET_INFO_METHOD},
    },
    reqwest::header::{self, HeaderValue},
    serde_json::Value,
    std::net::{IpAddr, SocketAddr},
    tracing::{debug, error, info, instrument},
    url::Url,
};

mod error;
pub mod types;

pub use {error::*, types::*};

/// Reads node status from a local daemon and forwards it to a caller-chosen
/// URL. Holds no per-invocation state.
pub struct NodeInfoRelay {
    rpc_host: IpAddr,
    authorization: HeaderValue,
    http_client: reqwest::Client,
}

impl NodeInfoRelay {
    pub fn new(credentials: &RpcCredentials, rpc_host: IpAddr) -> Result<Self, NodeRelayError> {
        let authorization = credentials.authorization_header()?;

        // Every call gets a fresh connection
        let http_client = reqwest::Client::builder()
            .pool_max_idle_per_host(0)
            .build()?;

        Ok(Self {
            rpc_host,
            authorization,
            http_client,
        })
    }

    pub fn rpc_client(&self, rpc_port: u16) -> RpcClient {
        RpcClient::new(
            self.http_client.clone(),
            self.authorization.clone(),
            SocketAddr::new(self.rpc_host, rpc_port),
        )
    }

    /// Runs the whole relay and returns the destination's JSON response.
    #[instrument(skip_all, fields(
        ticker = %request.ticker,
        post_url = %request.post_url,
        rpc_port = request.rpc_port,
    ))]
    pub async fn relay(&self, request: &RelayRequest) -> Result<Value, RelayError> {
        let result = self.collect_and_deliver(request).await;

        match &result {
            Ok(_) => info!("Successfully posted node info"),
            Err(e) => error!("Failed to complete node info posting process: {e}"),
        }
        result
    }

    async fn collect_and_deliver(&self, request: &RelayRequest) -> Result<Value, RelayError> {
        let payload = self.collect(&request.ticker, request.rpc_port).await?;
        self.deliver(&request.post_url, &payload).await
    }

    /// Queries `getinfo` then `getblockhash` and builds the outbound payload.
    pub async fn collect(&self, ticker: &str, rpc_port: u16) -> Result<RelayPayload, RelayError> {
        let rpc = self.rpc_client(rpc_port);

        let info = rpc.call(GET_INFO_METHOD, vec![]).await?;
        let info = serde_json::from_value::<NodeInfo>(info).map_err(|e| RelayError::Transport {
            stage: RelayStage::Rpc(GET_INFO_METHOD.to_owned()),
            source: e.into(),
        })?;

        let block_hash = rpc
            .call(GET_BLOCK_HASH_METHOD, info.block_hash_params())
            .await?;

        Ok(RelayPayload::new(ticker, info, block_hash))
    }

    /// Single POST of the payload, no retry.
    pub async fn deliver(&self, post_url: &Url, payload: &RelayPayload) -> Result<Value, RelayError> {
        let transport = |source: TransportError| RelayError::Transport {
            stage: RelayStage::Delivery,
            source,
        };

        debug!("Sending final payload: {payload:?}");
        let response = self
            .http_client
            .post(post_url.clone())
            .header(header::ACCEPT, "*/*")
            .json(payload)
            .send()
            .await
            .map_err(|e| transport(e.into()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(RelayError::Delivery(status));
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| transport(e.into()))
    }
}
