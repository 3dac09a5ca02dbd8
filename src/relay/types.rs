use {
    super::error::RelayError,
    serde::{de::Error as _, Deserialize, Deserializer, Serialize},
    serde_json::Value,
    url::Url,
    validator::Validate,
};

pub const DEFAULT_RPC_PORT: u16 = 51475;

/// A validated relay invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelayRequest {
    pub ticker: String,
    pub post_url: Url,
    pub rpc_port: u16,
}

/// Inbound body of the node-monitor route before validation.
///
/// Deserialization is lenient: numbers are accepted for `ticker`, numeric
/// strings for `rpcPort`, and values of any other type count as missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RelayRequestBody {
    #[validate(required, length(min = 1))]
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub ticker: Option<String>,
    #[validate(required, length(min = 1))]
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub post_url: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_port",
        skip_serializing_if = "Option::is_none"
    )]
    pub rpc_port: Option<u16>,
}

impl RelayRequestBody {
    /// Parses a raw route body regardless of its content type. An empty body
    /// or `null` is an empty request.
    pub fn from_slice(body: &[u8]) -> Result<Self, RelayError> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }
        serde_json::from_slice::<Option<Self>>(body)
            .map(Option::unwrap_or_default)
            .map_err(|e| RelayError::Validation(format!("Invalid request body: {e}")))
    }

    pub fn into_request(self, default_rpc_port: u16) -> Result<RelayRequest, RelayError> {
        self.validate()
            .map_err(|_| RelayError::missing_parameters())?;

        // Both are `Some` once validation passed
        let ticker = self.ticker.unwrap_or_default();
        let post_url = self.post_url.unwrap_or_default();

        Ok(RelayRequest {
            ticker,
            post_url: parse_post_url(&post_url)?,
            rpc_port: self.rpc_port.unwrap_or(default_rpc_port),
        })
    }
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(value) => Some(value),
        Value::Number(value) => Some(value.to_string()),
        _ => None,
    })
}

fn lenient_port<'de, D>(deserializer: D) -> Result<Option<u16>, D::Error>
where
    D: Deserializer<'de>,
{
    let port = match Value::deserialize(deserializer)? {
        Value::Null => return Ok(None),
        Value::Number(number) => number.as_u64().and_then(|port| u16::try_from(port).ok()),
        Value::String(string) => string.trim().parse::<u16>().ok(),
        _ => None,
    };
    port.map(Some)
        .ok_or_else(|| D::Error::custom("rpcPort must be a port number"))
}

/// Keeps an explicit `null` as `Some(Value::Null)`; only a missing field is
/// `None`.
fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

/// Any absolute http(s) URL is accepted, there is no destination allow-list.
pub fn parse_post_url(post_url: &str) -> Result<Url, RelayError> {
    let url = Url::parse(post_url)
        .map_err(|e| RelayError::Validation(format!("Invalid postUrl `{post_url}`: {e}")))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        scheme => Err(RelayError::Validation(format!(
            "Invalid postUrl `{post_url}`: unsupported scheme `{scheme}`"
        ))),
    }
}

/// Fields picked out of the daemon's `getinfo` result. Values are passed
/// through untouched, an explicit `null` included.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeInfo {
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub version: Option<Value>,
    #[serde(
        default,
        rename = "protocolversion",
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub protocol_version: Option<Value>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub blocks: Option<Value>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub connections: Option<Value>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<Value>,
}

impl NodeInfo {
    /// `getblockhash` params for the reported height.
    pub fn block_hash_params(&self) -> Vec<Value> {
        vec![self.blocks.clone().unwrap_or(Value::Null)]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelayPayload {
    pub ticker: String,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub version: Option<Value>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub protocol_version: Option<Value>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub num_blocks: Option<Value>,
    pub block_hash: Value,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub connections: Option<Value>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<Value>,
}

impl RelayPayload {
    pub fn new(ticker: impl Into<String>, info: NodeInfo, block_hash: Value) -> Self {
        let NodeInfo {
            version,
            protocol_version,
            blocks,
            connections,
            difficulty,
        } = info;

        Self {
            ticker: ticker.into(),
            version,
            protocol_version,
            num_blocks: blocks,
            block_hash,
            connections,
            difficulty,
        }
    }
}
