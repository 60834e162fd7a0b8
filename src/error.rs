use axum::http::StatusCode;
use std::path::PathBuf;
use thiserror::Error;

/// Failures raised while resolving a date or reading a daily log.
#[derive(Debug, Error)]
pub enum StatsError {
    #[error("date provided ({input}) is not properly formatted")]
    InvalidDate { input: String },

    #[error("malformed log line {line} in {}: {reason}", path.display())]
    MalformedLine {
        path: PathBuf,
        line: u64,
        reason: String,
    },

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl StatsError {
    pub fn invalid_date(input: impl Into<String>) -> Self {
        Self::InvalidDate {
            input: input.into(),
        }
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Status the envelope layer reports for this failure.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidDate { .. } => StatusCode::BAD_REQUEST,
            Self::MalformedLine { .. } | Self::Io { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn is_client_error(&self) -> bool {
        self.status_code().is_client_error()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_date_is_client_error() {
        let err = StatsError::invalid_date("yesterday-ish");
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert!(err.is_client_error());
        assert_eq!(
            err.to_string(),
            "date provided (yesterday-ish) is not properly formatted"
        );
    }

    #[test]
    fn test_read_failures_are_server_errors() {
        let io_err = std::io::Error::new(std::io::ErrorKind::InvalidData, "bad gzip header");
        let err = StatsError::io("/tmp/x.gz", io_err);
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(err.to_string().contains("bad gzip header"));

        let err = StatsError::MalformedLine {
            path: PathBuf::from("/tmp/x"),
            line: 3,
            reason: "expected at least 7 fields, found 2".to_string(),
        };
        assert!(!err.is_client_error());
        assert!(err.to_string().contains("line 3"));
    }
}
