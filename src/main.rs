use overlord_metrics::config::Config;
use overlord_metrics::services::metrics::METRICS;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "overlord_metrics=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env().expect("Failed to load environment configuration");

    METRICS.set_enabled(config.metrics_enabled);
    let registry = METRICS.init().expect("Failed to register proxy metrics");
    tracing::info!(enabled = config.metrics_enabled, "Registered proxy metrics");

    let app = overlord_metrics::create_app(registry);

    let listener = tokio::net::TcpListener::bind(config.listen_addr)
        .await
        .unwrap();
    tracing::info!("Metrics endpoint on http://{}/metrics", config.listen_addr);
    axum::serve(listener, app).await.unwrap();
}
