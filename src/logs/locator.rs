use chrono::{Datelike, NaiveDate};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::config::LogsConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compression {
    Plain,
    Gzip,
}

/// A daily log that exists on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocatedLog {
    pub path: PathBuf,
    pub compression: Compression,
}

/// Finds the daily request log for a log date.
///
/// Recent logs live flat and uncompressed in `plain_dir`; older ones were
/// moved into `archive_dir/<year>/` and gzipped. Both layouts are checked,
/// the flat one first.
#[derive(Debug, Clone)]
pub struct LogLocator {
    plain_dir: PathBuf,
    archive_dir: PathBuf,
    prefix: String,
}

impl LogLocator {
    pub fn new(config: &LogsConfig) -> Self {
        Self {
            plain_dir: config.plain_dir.clone(),
            archive_dir: config.archive_dir.clone(),
            prefix: config.prefix.clone(),
        }
    }

    pub fn plain_path(&self, log_date: NaiveDate) -> PathBuf {
        self.plain_dir
            .join(format!("{}.{}", self.prefix, log_date.format("%Y-%m-%d")))
    }

    pub fn archive_path(&self, log_date: NaiveDate) -> PathBuf {
        self.archive_dir
            .join(format!("{:04}", log_date.year()))
            .join(format!("{}.{}.gz", self.prefix, log_date.format("%Y-%m-%d")))
    }

    /// Only checks for existence; nothing is opened here.
    pub async fn locate(&self, log_date: NaiveDate) -> Option<LocatedLog> {
        let plain = self.plain_path(log_date);
        if is_file(&plain).await {
            return Some(LocatedLog {
                path: plain,
                compression: Compression::Plain,
            });
        }

        let archived = self.archive_path(log_date);
        if is_file(&archived).await {
            return Some(LocatedLog {
                path: archived,
                compression: Compression::Gzip,
            });
        }

        debug!(
            plain = %plain.display(),
            archived = %archived.display(),
            "no request log for {log_date}"
        );
        None
    }
}

async fn is_file(path: &Path) -> bool {
    tokio::fs::metadata(path)
        .await
        .map(|meta| meta.is_file())
        .unwrap_or(false)
}
