//! Per-request counters folded from request log lines

use serde::Serialize;
use std::collections::BTreeMap;

use super::entry::LogEntry;
use super::languages::normalize;

/// Bucket for pairs with no usable language on either side.
pub const UNKNOWN_PAIR: &str = "unknown";

/// Shared mailbox used by both front ends; only the referer tells them apart.
pub const SOFTCATALA_SOURCE: &str = "traductor@softcatala.org";
pub const SOFTVALENCIA_SOURCE: &str = "traductor@softvalencia.org";
const SOFTVALENCIA_REFERER_MARKER: &str = "softvalencia";

/// Statistics for one daily log, serialised as the `result` payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StatsResult {
    pub total: u64,
    pub langstats: BTreeMap<String, u64>,
    pub srcstats: BTreeMap<String, u64>,
}

#[derive(Debug, Default)]
pub struct StatsAggregator {
    stats: StatsResult,
}

impl StatsAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold a parsed line into all three counters.
    pub fn record(&mut self, entry: &LogEntry<'_>) {
        self.record_line();
        self.record_pair(entry.pair);
        self.record_source(entry.source, entry.referer);
    }

    pub fn record_line(&mut self) {
        self.stats.total += 1;
    }

    pub fn record_pair(&mut self, pair: &str) {
        let key = pair_key(pair);
        *self.stats.langstats.entry(key).or_insert(0) += 1;
    }

    pub fn record_source(&mut self, source: &str, referer: &str) {
        let key = source_key(source, referer);
        *self.stats.srcstats.entry(key.to_string()).or_insert(0) += 1;
    }

    pub fn total(&self) -> u64 {
        self.stats.total
    }

    pub fn finish(self) -> StatsResult {
        self.stats
    }
}

fn pair_key(pair: &str) -> String {
    if pair.is_empty() {
        return UNKNOWN_PAIR.to_string();
    }

    let (left, right) = pair.split_once('|').unwrap_or((pair, ""));
    let key = format!("{}-{}", normalize(left), normalize(right));
    if key == "-" {
        UNKNOWN_PAIR.to_string()
    } else {
        key
    }
}

fn source_key<'a>(source: &'a str, referer: &str) -> &'a str {
    if source != SOFTCATALA_SOURCE && source != SOFTVALENCIA_SOURCE {
        return source;
    }

    if referer.contains(SOFTVALENCIA_REFERER_MARKER) {
        SOFTVALENCIA_SOURCE
    } else {
        SOFTCATALA_SOURCE
    }
}
