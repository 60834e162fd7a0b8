//! Daily translation request statistics
//!
//! A day's request log is streamed line by line and folded into three
//! counters: the total, a per language pair distribution and a per
//! requester distribution. Nothing is cached; each call re-reads the log.

pub mod aggregator;
pub mod date;
pub mod entry;
pub mod languages;
pub mod service;

pub use aggregator::{StatsAggregator, StatsResult};
pub use date::{log_date_for, resolve_date};
pub use entry::LogEntry;
pub use service::{aggregate, DailyStats, StatsService};
