//! Borrowed view over a single request log line

// Lines are split on single spaces, so runs of spaces produce empty fields
// and shift the positions.
const PAIR_FIELD: usize = 2;
const SOURCE_FIELD: usize = 4;
const REFERER_FIELD: usize = 6;

pub const MIN_FIELDS: usize = REFERER_FIELD + 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogEntry<'a> {
    /// `source|target` language pair, possibly empty
    pub pair: &'a str,
    /// Requester identity (usually the API user's mailbox)
    pub source: &'a str,
    /// HTTP referer of the original translation request
    pub referer: &'a str,
}

impl<'a> LogEntry<'a> {
    /// Parse one line with its terminator already stripped.
    ///
    /// Returns the reason as text on failure; the caller attaches the
    /// file and line number.
    pub fn parse(line: &'a str) -> Result<Self, String> {
        let fields: Vec<&str> = line.split(' ').collect();
        if fields.len() < MIN_FIELDS {
            return Err(format!(
                "expected at least {MIN_FIELDS} fields, found {}",
                fields.len()
            ));
        }

        let pair = fields[PAIR_FIELD];
        if !pair.is_empty() && pair.matches('|').count() != 1 {
            return Err(format!("language pair '{pair}' is not of the form source|target"));
        }

        Ok(Self {
            pair,
            source: fields[SOURCE_FIELD],
            referer: fields[REFERER_FIELD],
        })
    }
}
