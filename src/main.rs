use {
    node_info_relay::{config::get_configuration, Result},
    tokio::sync::broadcast,
    tracing::info,
    tracing_subscriber::fmt::format::FmtSpan,
};

#[tokio::main]
async fn main() -> Result<()> {
    let config = get_configuration()?;

    tracing_subscriber::fmt()
        .with_env_filter(&config.log_level)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(std::env::var("ANSI_LOGS").is_ok())
        .init();

    let (signal, shutdown) = broadcast::channel(1);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Shutdown signal received");
            let _ = signal.send(());
        }
    });

    node_info_relay::bootstrap(shutdown, config).await
}
