use {
    crate::relay::{RelayError, RelayStage, TransportError},
    base64::{engine::general_purpose::STANDARD as BASE64, Engine},
    reqwest::header::{self, HeaderValue, InvalidHeaderValue},
    serde::{Deserialize, Serialize},
    serde_json::Value,
    std::{fmt, net::SocketAddr},
    tracing::{debug, instrument},
};

pub const JSON_RPC_VERSION: &str = "2.0";

/// The daemon ignores the id, every call uses the same one.
pub const JSON_RPC_REQUEST_ID: u64 = 0;

pub const GET_INFO_METHOD: &str = "getinfo";
pub const GET_BLOCK_HASH_METHOD: &str = "getblockhash";

#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct RpcCredentials {
    pub username: String,
    pub password: String,
}

impl RpcCredentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn authorization_header(&self) -> Result<HeaderValue, InvalidHeaderValue> {
        let encoded = BASE64.encode(format!("{}:{}", self.username, self.password));
        let mut value = HeaderValue::from_str(&format!("Basic {encoded}"))?;

        // Make sure we're not leaking credentials in debug output.
        value.set_sensitive(true);

        Ok(value)
    }
}

impl fmt::Debug for RpcCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RpcCredentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct JsonRpcRequest {
    pub method: String,
    pub params: Vec<Value>,
    pub jsonrpc: String,
    pub id: u64,
}

impl JsonRpcRequest {
    pub fn new(method: &str, params: Vec<Value>) -> Self {
        Self {
            method: method.to_owned(),
            params,
            jsonrpc: JSON_RPC_VERSION.to_owned(),
            id: JSON_RPC_REQUEST_ID,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct JsonRpcResponse {
    #[serde(default)]
    pub result: Value,
    /// `null` and a missing field both mean success.
    #[serde(default)]
    pub error: Option<Value>,
    #[serde(default)]
    pub id: Option<Value>,
}

/// Single-shot JSON-RPC client for one daemon endpoint.
pub struct RpcClient {
    endpoint: String,
    authorization: HeaderValue,
    http_client: reqwest::Client,
}

impl RpcClient {
    pub fn new(
        http_client: reqwest::Client,
        authorization: HeaderValue,
        socket_addr: SocketAddr,
    ) -> Self {
        Self {
            endpoint: format!("http://{socket_addr}"),
            authorization,
            http_client,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    #[instrument(skip(self, params), fields(endpoint = %self.endpoint))]
    pub async fn call(&self, method: &str, params: Vec<Value>) -> Result<Value, RelayError> {
        let transport = |source: TransportError| RelayError::Transport {
            stage: RelayStage::Rpc(method.to_owned()),
            source,
        };

        let response = self
            .http_client
            .post(&self.endpoint)
            .header(header::AUTHORIZATION, self.authorization.clone())
            .json(&JsonRpcRequest::new(method, params))
            .send()
            .await
            .map_err(|e| transport(e.into()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(transport(TransportError::Status(status)));
        }

        let response = response
            .json::<JsonRpcResponse>()
            .await
            .map_err(|e| transport(e.into()))?;

        if let Some(error) = response.error {
            return Err(RelayError::Rpc {
                method: method.to_owned(),
                error,
            });
        }

        debug!("RPC `{method}` returned {}", response.result);
        Ok(response.result)
    }
}

#[cfg(test)]
mod tests {
    use {super::*, serde_json::json};

    #[test]
    fn request_body_shape() {
        let request = JsonRpcRequest::new(GET_BLOCK_HASH_METHOD, vec![json!(123456)]);
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "method": "getblockhash",
                "params": [123456],
                "jsonrpc": "2.0",
                "id": 0,
            })
        );

        let request = JsonRpcRequest::new(GET_INFO_METHOD, vec![]);
        assert_eq!(serde_json::to_value(&request).unwrap()["params"], json!([]));
    }

    #[test]
    fn authorization_header_is_basic_and_sensitive() {
        let header = RpcCredentials::new("relay-user", "relay-password")
            .authorization_header()
            .unwrap();
        assert_eq!(header, "Basic cmVsYXktdXNlcjpyZWxheS1wYXNzd29yZA==");
        assert!(header.is_sensitive());
    }

    #[test]
    fn debug_output_hides_password() {
        let debug = format!("{:?}", RpcCredentials::new("relay-user", "hunter2"));
        assert!(debug.contains("relay-user"));
        assert!(!debug.contains("hunter2"));
    }

    #[test]
    fn null_error_is_success() {
        let response = serde_json::from_value::<JsonRpcResponse>(json!({
            "result": "00000abc",
            "error": null,
            "id": 0,
        }))
        .unwrap();
        assert_eq!(response.error, None);
        assert_eq!(response.result, json!("00000abc"));

        let response = serde_json::from_value::<JsonRpcResponse>(json!({
            "error": {"code": -28, "message": "Loading block index..."},
        }))
        .unwrap();
        assert_eq!(response.result, Value::Null);
        assert_eq!(response.error.unwrap()["code"], json!(-28));
    }
}
