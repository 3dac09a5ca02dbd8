use {
    crate::relay::RelayError,
    axum::{
        http::StatusCode,
        response::{IntoResponse, Response},
        Json,
    },
    serde::{Deserialize, Serialize},
    tracing::{error, warn},
};

pub type Result<T> = std::result::Result<T, NodeRelayError>;

#[derive(Debug, thiserror::Error)]
pub enum NodeRelayError {
    #[error(transparent)]
    Relay(#[from] RelayError),

    #[error(transparent)]
    Envy(#[from] envy::Error),

    #[error(transparent)]
    DotEnvy(#[from] dotenvy::Error),

    #[error(transparent)]
    Url(#[from] url::ParseError),

    #[error(transparent)]
    Reqwest(#[from] reqwest::Error),

    #[error(transparent)]
    InvalidHeaderValue(#[from] axum::http::header::InvalidHeaderValue),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Error body returned by the HTTP route, shaped after the `createError`
/// responses the route's existing clients already parse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponseBody {
    pub status_code: u16,
    pub status_message: String,
}

impl NodeRelayError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Relay(RelayError::Validation(_)) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for NodeRelayError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!("Error in node-monitor route: {self}");
        } else {
            warn!("Rejected node-monitor request: {self}");
        }

        (
            status,
            Json(ErrorResponseBody {
                status_code: status.as_u16(),
                status_message: self.to_string(),
            }),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::relay::{RelayStage, TransportError},
    };

    #[test]
    fn validation_maps_to_bad_request() {
        let error = NodeRelayError::from(RelayError::missing_parameters());
        assert_eq!(error.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            error.to_string(),
            "Missing required parameters: ticker and postUrl"
        );
    }

    #[test]
    fn relay_failures_map_to_internal_error() {
        let delivery = NodeRelayError::from(RelayError::Delivery(StatusCode::BAD_GATEWAY));
        assert_eq!(delivery.status_code(), StatusCode::INTERNAL_SERVER_ERROR);

        let transport = NodeRelayError::from(RelayError::Transport {
            stage: RelayStage::Rpc("getinfo".to_owned()),
            source: TransportError::Status(StatusCode::UNAUTHORIZED),
        });
        assert_eq!(transport.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            transport.to_string(),
            "Error sending RPC request `getinfo`: HTTP error! status: 401 Unauthorized"
        );

        let rpc = NodeRelayError::from(RelayError::Rpc {
            method: "getblockhash".to_owned(),
            error: serde_json::json!({"code": -8, "message": "Block height out of range"}),
        });
        assert_eq!(rpc.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
