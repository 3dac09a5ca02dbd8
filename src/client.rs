use {
    crate::{
        error::{ErrorResponseBody, NodeRelayError},
        relay::RelayRequestBody,
        services::public_http_server::NODE_MONITOR_ENDPOINT,
    },
    serde_json::Value,
    tokio::sync::watch,
    tracing::warn,
    url::Url,
};

/// Observable state of the last node-monitor call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MonitorState {
    pub data: Option<Value>,
    pub pending: bool,
    pub error: Option<String>,
}

/// Calls a running relay server's node-monitor route and publishes
/// loading/error/data state to subscribers.
pub struct NodeMonitorClient {
    endpoint: Url,
    http_client: reqwest::Client,
    state: watch::Sender<MonitorState>,
}

impl NodeMonitorClient {
    pub fn new(server_url: &Url) -> Result<Self, NodeRelayError> {
        let (state, _) = watch::channel(MonitorState::default());
        Ok(Self {
            endpoint: server_url.join(NODE_MONITOR_ENDPOINT)?,
            http_client: reqwest::Client::new(),
            state,
        })
    }

    pub fn subscribe(&self) -> watch::Receiver<MonitorState> {
        self.state.subscribe()
    }

    pub fn state(&self) -> MonitorState {
        self.state.borrow().clone()
    }

    /// Omitting `rpc_port` leaves the choice to the server's default.
    pub async fn execute(&self, body: &RelayRequestBody) -> MonitorState {
        self.state.send_replace(MonitorState {
            data: None,
            pending: true,
            error: None,
        });

        let outcome = self.request(body).await;

        self.state.send_modify(|state| {
            state.pending = false;
            match outcome {
                Ok(data) => state.data = Some(data),
                Err(error) => {
                    warn!("node-monitor request failed: {error}");
                    state.error = Some(error);
                }
            }
        });

        self.state()
    }

    async fn request(&self, body: &RelayRequestBody) -> Result<Value, String> {
        let response = self
            .http_client
            .post(self.endpoint.clone())
            .json(body)
            .send()
            .await
            .map_err(|e| e.to_string())?;

        let status = response.status();
        if status.is_success() {
            return response.json::<Value>().await.map_err(|e| e.to_string());
        }

        // Prefer the server's own message over the bare status
        match response.json::<ErrorResponseBody>().await {
            Ok(body) => Err(body.status_message),
            Err(_) => Err(format!("HTTP error! status: {status}")),
        }
    }
}
