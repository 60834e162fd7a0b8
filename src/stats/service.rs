use chrono::{Local, NaiveDate};
use serde::{Serialize, Serializer};
use tracing::{debug, info};

use super::aggregator::{StatsAggregator, StatsResult};
use super::date::{log_date_for, resolve_date};
use super::entry::LogEntry;
use crate::error::StatsError;
use crate::logs::{open_log, LocatedLog, LogLocator};

/// Statistics for one requested day, as sent in the success envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyStats {
    pub date: NaiveDate,
    pub status: u16,
    /// `false` on the wire when no log exists for the day
    #[serde(serialize_with = "result_or_false")]
    pub result: Option<StatsResult>,
}

fn result_or_false<S: Serializer>(
    result: &Option<StatsResult>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match result {
        Some(stats) => stats.serialize(serializer),
        None => serializer.serialize_bool(false),
    }
}

#[derive(Debug, Clone)]
pub struct StatsService {
    locator: LogLocator,
}

impl StatsService {
    pub fn new(locator: LogLocator) -> Self {
        Self { locator }
    }

    /// Statistics for the day named by `date_query` (yesterday when absent).
    pub async fn collect(&self, date_query: Option<&str>) -> Result<DailyStats, StatsError> {
        let today = Local::now().date_naive();
        let date = resolve_date(date_query, today)?;
        self.collect_for(date).await
    }

    pub async fn collect_for(&self, date: NaiveDate) -> Result<DailyStats, StatsError> {
        let log_date = log_date_for(date)?;

        let result = match self.locator.locate(log_date).await {
            Some(log) => {
                info!(%date, path = %log.path.display(), "aggregating request log");
                let stats = aggregate(&log).await?;
                info!(%date, total = stats.total, "request log aggregated");
                Some(stats)
            }
            None => {
                info!(%date, %log_date, "no request log for date");
                None
            }
        };

        Ok(DailyStats {
            date,
            status: 200,
            result,
        })
    }
}

/// Fold every line of `log` into a fresh aggregator.
///
/// Any read failure or malformed line discards the partial counts.
pub async fn aggregate(log: &LocatedLog) -> Result<StatsResult, StatsError> {
    let mut source = open_log(log)
        .await
        .map_err(|e| StatsError::io(&log.path, e))?;

    let mut aggregator = StatsAggregator::new();
    let mut line_no = 0u64;
    while let Some(line) = source
        .next_line()
        .await
        .map_err(|e| StatsError::io(&log.path, e))?
    {
        line_no += 1;
        if line.trim().is_empty() {
            continue;
        }

        let entry = LogEntry::parse(&line).map_err(|reason| StatsError::MalformedLine {
            path: log.path.clone(),
            line: line_no,
            reason,
        })?;
        aggregator.record(&entry);
    }

    debug!(lines = line_no, counted = aggregator.total(), "finished reading request log");
    Ok(aggregator.finish())
}
