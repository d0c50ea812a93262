use clap::Parser;
use geodash::utils::logger;
use geodash::{AggregationPipeline, AppConfig};
use std::net::SocketAddr;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::parse();

    logger::init_server_logger(config.verbose);

    tracing::info!("Starting geodash server");
    tracing::info!(
        "  - NEWS_API_KEY: {}",
        if config.news_api_key.is_some() { "✓ Set" } else { "✗ Missing" }
    );
    tracing::info!(
        "  - EXCHANGE_RATE_KEY: {}",
        if config.exchange_rate_key.is_some() { "✓ Set" } else { "✗ Missing" }
    );
    tracing::info!("  - PORT: {}", config.port);

    if config.exchange_rate_key.is_none() {
        tracing::warn!("⚠ EXCHANGE_RATE_KEY is missing, /api/data requests will fail");
    }

    let port = config.port;
    let static_dir = config.static_dir.clone();
    let pipeline = Arc::new(AggregationPipeline::new(config)?);
    let app = geodash::server::router(pipeline, &static_dir);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("🚀 Server running on http://localhost:{}", port);

    axum::serve(listener, app).await?;

    Ok(())
}
