use {reqwest::StatusCode, serde_json::Value, std::fmt};

pub const MISSING_PARAMETERS_MESSAGE: &str = "Missing required parameters: ticker and postUrl";

/// Which leg of the relay a transport failure happened on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelayStage {
    Rpc(String),
    Delivery,
}

impl fmt::Display for RelayStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rpc(method) => write!(f, "RPC request `{method}`"),
            Self::Delivery => write!(f, "POST request to external URL"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("HTTP error! status: {0}")]
    Status(StatusCode),

    #[error(transparent)]
    Network(#[from] reqwest::Error),

    #[error("Malformed response: {0}")]
    Decode(#[from] serde_json::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    #[error("Error sending {stage}: {source}")]
    Transport {
        stage: RelayStage,
        source: TransportError,
    },

    #[error("RPC Error from `{method}`: {error}")]
    Rpc { method: String, error: Value },

    #[error("{0}")]
    Validation(String),

    #[error("Failed to post to external URL. Status: {0}")]
    Delivery(StatusCode),
}

impl RelayError {
    pub fn missing_parameters() -> Self {
        Self::Validation(MISSING_PARAMETERS_MESSAGE.to_owned())
    }
}
