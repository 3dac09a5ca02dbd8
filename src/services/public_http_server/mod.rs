use {
    crate::state::AppState,
    axum::{
        http,
        routing::{get, post},
        Router,
    },
    std::{
        net::{IpAddr, SocketAddr},
        sync::Arc,
    },
    tokio::{net::TcpListener, sync::broadcast},
    tower::ServiceBuilder,
    tower_http::{
        cors::{Any, CorsLayer},
        request_id::MakeRequestUuid,
        trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
        ServiceBuilderExt,
    },
    tracing::{info, Level},
};

pub const HEALTH_ENDPOINT: &str = "/health";
pub const NODE_MONITOR_ENDPOINT: &str = "/api/node-monitor";

pub mod handlers;

pub fn router(state: Arc<AppState>) -> Router {
    let global_middleware = ServiceBuilder::new()
        .set_x_request_id(MakeRequestUuid)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(
                    DefaultMakeSpan::new()
                        .level(Level::INFO)
                        .include_headers(true),
                )
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .include_headers(true),
                ),
        )
        .propagate_x_request_id()
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_headers([http::header::CONTENT_TYPE, http::header::ACCEPT]),
        );

    Router::new()
        .route(HEALTH_ENDPOINT, get(handlers::health::handler))
        .route(NODE_MONITOR_ENDPOINT, post(handlers::node_monitor::handler))
        .layer(global_middleware)
        .with_state(state)
}

pub async fn start(
    bind_ip: IpAddr,
    port: u16,
    state: Arc<AppState>,
    mut shutdown: broadcast::Receiver<()>,
) -> std::io::Result<()> {
    let app = router(state);

    let addr = SocketAddr::from((bind_ip, port));
    info!("Starting public HTTP server on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(async move {
        let _ = shutdown.recv().await;
        info!("Shutdown signal received, stopping public HTTP server");
    })
    .await
}
