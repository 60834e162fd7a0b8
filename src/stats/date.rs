//! Resolution of the `date` query parameter

use chrono::{DateTime, Days, NaiveDate, NaiveDateTime};

use crate::error::StatsError;

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%Y%m%d",
    "%m/%d/%Y",
    "%d.%m.%Y",
    "%b %d %Y",
    "%b %d, %Y",
    "%B %d %Y",
    "%B %d, %Y",
    "%d %b %Y",
    "%d %B %Y",
];

const DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M"];

/// Calendar date the caller asked for, defaulting to the day before `today`.
pub fn resolve_date(input: Option<&str>, today: NaiveDate) -> Result<NaiveDate, StatsError> {
    let input = match input.map(str::trim) {
        Some(s) if !s.is_empty() => s,
        _ => {
            return today
                .checked_sub_days(Days::new(1))
                .ok_or_else(|| StatsError::invalid_date(today.to_string()))
        }
    };

    parse_date(input).ok_or_else(|| StatsError::invalid_date(input))
}

/// Date label of the log file holding statistics for `date`.
///
/// Logs are rotated shortly after midnight, so the file named after a day
/// holds the requests of the day before.
pub fn log_date_for(date: NaiveDate) -> Result<NaiveDate, StatsError> {
    date.succ_opt()
        .ok_or_else(|| StatsError::invalid_date(date.to_string()))
}

fn parse_date(input: &str) -> Option<NaiveDate> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(dt.date_naive());
    }

    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(input, fmt).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(input, fmt).ok())
                .map(|dt| dt.date())
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_missing_date_is_yesterday() {
        let today = ymd(2024, 3, 1);
        assert_eq!(resolve_date(None, today).unwrap(), ymd(2024, 2, 29));
        assert_eq!(resolve_date(Some("  "), today).unwrap(), ymd(2024, 2, 29));
    }

    #[test]
    fn test_accepted_forms() {
        let today = ymd(2030, 1, 1);
        let expected = ymd(2024, 1, 5);
        for input in [
            "2024-01-05",
            "2024/01/05",
            "20240105",
            "01/05/2024",
            "05.01.2024",
            "Jan 5 2024",
            "January 5, 2024",
            "5 January 2024",
            "2024-01-05T23:10:00",
            "2024-01-05T23:10:00+02:00",
        ] {
            assert_eq!(resolve_date(Some(input), today).unwrap(), expected, "{input}");
        }
    }

    #[test]
    fn test_unparseable_dates_are_rejected() {
        let today = ymd(2024, 3, 1);
        for input in ["tomorrow", "2024-02-30", "2024-13-01", "<script>"] {
            let err = resolve_date(Some(input), today).unwrap_err();
            assert!(matches!(err, StatsError::InvalidDate { .. }), "{input}");
            assert!(err.to_string().contains(input));
        }
    }

    #[test]
    fn test_log_date_is_next_day() {
        assert_eq!(log_date_for(ymd(2023, 12, 31)).unwrap(), ymd(2024, 1, 1));
        assert_eq!(log_date_for(ymd(2024, 2, 28)).unwrap(), ymd(2024, 2, 29));
        assert!(log_date_for(NaiveDate::MAX).is_err());
    }
}
