//! Lazy line sources over plain and gzip-compressed logs
//!
//! Archived logs can be large, so they are never read whole: each source
//! keeps one buffered line in memory at a time. The file handle is released
//! when the source is dropped, whether or not it was read to the end.

use async_compression::tokio::bufread::GzipDecoder;
use async_trait::async_trait;
use std::io;
use tokio::fs::File;
use tokio::io::{AsyncBufReadExt, BufReader, Lines};

use super::locator::{Compression, LocatedLog};

#[async_trait]
pub trait LineSource: Send {
    /// Next line without its terminator, or `None` at end of file.
    async fn next_line(&mut self) -> io::Result<Option<String>>;
}

pub struct PlainLog {
    lines: Lines<BufReader<File>>,
}

impl PlainLog {
    pub fn new(file: File) -> Self {
        Self {
            lines: BufReader::new(file).lines(),
        }
    }
}

#[async_trait]
impl LineSource for PlainLog {
    async fn next_line(&mut self) -> io::Result<Option<String>> {
        self.lines.next_line().await
    }
}

pub struct GzipLog {
    lines: Lines<BufReader<GzipDecoder<BufReader<File>>>>,
}

impl GzipLog {
    pub fn new(file: File) -> Self {
        let mut decoder = GzipDecoder::new(BufReader::new(file));
        // rotated archives are sometimes concatenations of several gzip members
        decoder.multiple_members(true);
        Self {
            lines: BufReader::new(decoder).lines(),
        }
    }
}

#[async_trait]
impl LineSource for GzipLog {
    async fn next_line(&mut self) -> io::Result<Option<String>> {
        self.lines.next_line().await
    }
}

/// Open a located log, decompressing on the fly when it is archived.
pub async fn open_log(log: &LocatedLog) -> io::Result<Box<dyn LineSource>> {
    let file = File::open(&log.path).await?;
    Ok(match log.compression {
        Compression::Plain => Box::new(PlainLog::new(file)),
        Compression::Gzip => Box::new(GzipLog::new(file)),
    })
}
