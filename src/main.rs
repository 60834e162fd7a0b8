use anyhow::Result;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

use traductor_stats::api;
use traductor_stats::config::Config;
use traductor_stats::logs::LogLocator;
use traductor_stats::stats::StatsService;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Load configuration
    let config = Config::from_env()?;
    info!("Loaded configuration");
    info!("📂 Plain logs: {}", config.logs.plain_dir.display());
    info!("🗄️  Archived logs: {}", config.logs.archive_dir.display());

    let service = StatsService::new(LogLocator::new(&config.logs));
    let router = api::create_stats_router(
        service,
        Duration::from_secs(config.server.request_timeout_secs),
    );

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("🚀 Stats server listening on http://{}", addr);

    axum::serve(listener, router).await?;

    Ok(())
}
