//! Pattern-driven timestamp parsing.

use chrono::{NaiveDate, NaiveDateTime};

use crate::error::ExtractError;

/// Default pattern for `start`/`end` values, e.g. `21-12-2011 10:00:00`.
pub const DEFAULT_DATETIME_PATTERN: &str = "%d-%m-%Y %H:%M:%S";

/// Default pattern for calendar-date bounds, e.g. `21-12-2011`.
pub const DEFAULT_DATE_PATTERN: &str = "%d-%m-%Y";

/// Parse `text` as a timestamp using a strftime-style `pattern`.
///
/// The whole text must be consumed and the pattern must determine both a
/// date and a time of day; anything else is a `MalformedTimestamp`.
pub fn parse_timestamp(text: &str, pattern: &str) -> Result<NaiveDateTime, ExtractError> {
    NaiveDateTime::parse_from_str(text, pattern).map_err(|_| malformed(text, pattern))
}

/// Parse `text` as a calendar date using a strftime-style `pattern`.
pub fn parse_date(text: &str, pattern: &str) -> Result<NaiveDate, ExtractError> {
    NaiveDate::parse_from_str(text, pattern).map_err(|_| malformed(text, pattern))
}

fn malformed(text: &str, pattern: &str) -> ExtractError {
    ExtractError::MalformedTimestamp {
        pattern: pattern.to_string(),
        text: text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, s)
            .unwrap()
    }

    #[test]
    fn test_parse_default_pattern() {
        let parsed = parse_timestamp("02-01-2020 03:04:05", DEFAULT_DATETIME_PATTERN).unwrap();
        assert_eq!(parsed, at(2020, 1, 2, 3, 4, 5));
    }

    #[test]
    fn test_parse_accepts_unpadded_fields() {
        let parsed = parse_timestamp("22-12-2011 0:0:00", DEFAULT_DATETIME_PATTERN).unwrap();
        assert_eq!(parsed, at(2011, 12, 22, 0, 0, 0));
    }

    #[test]
    fn test_parse_custom_pattern() {
        let parsed = parse_timestamp("2011-21-12 10:54:47", "%Y-%d-%m %H:%M:%S").unwrap();
        assert_eq!(parsed, at(2011, 12, 21, 10, 54, 47));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        let err = parse_timestamp("DOES NOT MATCH", DEFAULT_DATETIME_PATTERN).unwrap_err();
        assert!(matches!(
            err,
            ExtractError::MalformedTimestamp { ref text, ref pattern }
                if text == "DOES NOT MATCH" && pattern == DEFAULT_DATETIME_PATTERN
        ));
    }

    #[test]
    fn test_parse_rejects_missing_seconds() {
        let err = parse_timestamp("21-12-2011 10:55", DEFAULT_DATETIME_PATTERN).unwrap_err();
        assert!(matches!(err, ExtractError::MalformedTimestamp { .. }));
    }

    #[test]
    fn test_parse_rejects_pattern_without_time() {
        let err = parse_timestamp("02-01-2020 03:04:05", DEFAULT_DATE_PATTERN).unwrap_err();
        assert!(matches!(err, ExtractError::MalformedTimestamp { .. }));
    }

    #[test]
    fn test_parse_rejects_empty_text() {
        let err = parse_timestamp("", DEFAULT_DATETIME_PATTERN).unwrap_err();
        assert!(matches!(
            err,
            ExtractError::MalformedTimestamp { ref text, .. } if text.is_empty()
        ));
    }

    #[test]
    fn test_parse_date() {
        let parsed = parse_date("12-12-2020", DEFAULT_DATE_PATTERN).unwrap();
        assert_eq!(parsed, NaiveDate::from_ymd_opt(2020, 12, 12).unwrap());
        assert!(parse_date("WRONG", DEFAULT_DATE_PATTERN).is_err());
    }
}
