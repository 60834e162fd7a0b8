//! Locating and streaming the daily request logs

pub mod locator;
pub mod reader;

pub use locator::{Compression, LocatedLog, LogLocator};
pub use reader::{open_log, GzipLog, LineSource, PlainLog};
