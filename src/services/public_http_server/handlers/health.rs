use {
    crate::state::AppState,
    axum::{extract::State, http::StatusCode, response::IntoResponse},
    std::sync::Arc,
};

pub async fn handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let crate_info = &state.build_info.crate_info;
    (
        StatusCode::OK,
        format!("OK, {} v{}", crate_info.name, crate_info.version),
    )
}
