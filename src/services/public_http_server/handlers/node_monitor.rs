use {
    crate::{error::NodeRelayError, relay::RelayRequestBody, state::AppState},
    axum::{
        body::Bytes,
        extract::State,
        http::StatusCode,
        response::{IntoResponse, Response},
        Json,
    },
    std::sync::Arc,
    tracing::instrument,
};

/// Runs one relay for the posted `{ticker, postUrl, rpcPort}` and answers
/// with whatever JSON the destination returned.
///
/// The body is read as JSON whatever its content type, so every rejection
/// goes through `NodeRelayError` and keeps the `{statusCode, statusMessage}`
/// shape.
#[instrument(name = "node_monitor", skip_all)]
pub async fn handler(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Response, NodeRelayError> {
    let request = RelayRequestBody::from_slice(&body)?.into_request(state.config.default_rpc_port)?;
    let response = state.relay.relay(&request).await?;

    Ok((StatusCode::OK, Json(response)).into_response())
}
