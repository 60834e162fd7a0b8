use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use traductor_stats::config::Config;
use traductor_stats::logs::LogLocator;
use traductor_stats::stats::StatsService;

#[derive(Parser)]
#[command(name = "stats-report")]
#[command(about = "Print translation request statistics for one day", long_about = None)]
struct Cli {
    /// Day to report on (defaults to yesterday)
    #[arg(short, long)]
    date: Option<String>,
    /// Directory with uncompressed daily logs (overrides STATS_PLAIN_LOG_DIR)
    #[arg(long)]
    plain_dir: Option<PathBuf>,
    /// Root of the year-partitioned gzip archive (overrides STATS_ARCHIVE_LOG_DIR)
    #[arg(long)]
    archive_dir: Option<PathBuf>,
    /// Log file name prefix (overrides STATS_LOG_PREFIX)
    #[arg(long)]
    prefix: Option<String>,
    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut logs = Config::from_env()?.logs;
    if let Some(dir) = cli.plain_dir {
        logs.plain_dir = dir;
    }
    if let Some(dir) = cli.archive_dir {
        logs.archive_dir = dir;
    }
    if let Some(prefix) = cli.prefix {
        logs.prefix = prefix;
    }

    let service = StatsService::new(LogLocator::new(&logs));
    let daily = service
        .collect(cli.date.as_deref())
        .await
        .context("Failed to collect statistics")?;

    let json = if cli.pretty {
        serde_json::to_string_pretty(&daily)?
    } else {
        serde_json::to_string(&daily)?
    };
    println!("{}", json);

    if daily.result.is_none() {
        eprintln!("⚠ No request log found for {}", daily.date);
    }

    Ok(())
}
