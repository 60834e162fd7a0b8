use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub logs: LogsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Requests still running after this many seconds are answered with 408
    #[serde(default = "ServerConfig::default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogsConfig {
    /// Directory holding the flat, uncompressed daily logs
    pub plain_dir: PathBuf,
    /// Root of the year-partitioned gzip archive
    pub archive_dir: PathBuf,
    /// File name prefix shared by both layouts, e.g. `ScaleMTRequests.log`
    #[serde(default = "LogsConfig::default_prefix")]
    pub prefix: String,
}

impl ServerConfig {
    const fn default_request_timeout_secs() -> u64 {
        30
    }
}

impl LogsConfig {
    fn default_prefix() -> String {
        "ScaleMTRequests.log".to_string()
    }
}

impl Default for LogsConfig {
    fn default() -> Self {
        Self {
            plain_dir: PathBuf::from("/var/log/traductor"),
            archive_dir: PathBuf::from("/opt/traductor-requests"),
            prefix: Self::default_prefix(),
        }
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let host = std::env::var("STATS_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = std::env::var("STATS_PORT")
            .unwrap_or_else(|_| "7890".to_string())
            .parse::<u16>()
            .context("STATS_PORT must be a valid port number")?;

        let request_timeout_secs = match std::env::var("STATS_REQUEST_TIMEOUT_SECS") {
            Ok(v) => v
                .parse::<u64>()
                .context("STATS_REQUEST_TIMEOUT_SECS must be a whole number of seconds")?,
            Err(_) => ServerConfig::default_request_timeout_secs(),
        };

        let defaults = LogsConfig::default();
        let plain_dir = std::env::var("STATS_PLAIN_LOG_DIR")
            .map(PathBuf::from)
            .unwrap_or(defaults.plain_dir);
        let archive_dir = std::env::var("STATS_ARCHIVE_LOG_DIR")
            .map(PathBuf::from)
            .unwrap_or(defaults.archive_dir);
        let prefix = std::env::var("STATS_LOG_PREFIX").unwrap_or(defaults.prefix);

        Ok(Config {
            server: ServerConfig {
                host,
                port,
                request_timeout_secs,
            },
            logs: LogsConfig {
                plain_dir,
                archive_dir,
                prefix,
            },
        })
    }
}
