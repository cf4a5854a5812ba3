//! Failure conditions raised while extracting attendance records.

use std::io;
use std::sync::Arc;

use chrono::NaiveDateTime;
use thiserror::Error;

/// Format used when a timestamp is echoed back in an error message.
const DISPLAY_FORMAT: &str = "%d-%m-%Y %H:%M:%S";

/// Every way an attendance document can be rejected.
///
/// All variants are fatal for the current run. They are `Clone` so the
/// repository can report a recorded failure to later passes.
#[derive(Debug, Error, Clone)]
pub enum ExtractError {
    /// A `person` element carries no (or an empty) `full_name` attribute.
    #[error("attribute full_name is not found in tag person")]
    MissingEmployeeName,

    /// A `start`/`end` value does not match the configured pattern.
    #[error("'{text}' does not match datetime pattern '{pattern}'")]
    MalformedTimestamp { pattern: String, text: String },

    /// A `person` element closed without both a `start` and an `end`.
    #[error("wrong structure of the given file: person closed without both start and end")]
    IncompleteRecord,

    /// A record whose start instant is strictly after its end instant.
    #[error(
        "time in start tag ({}) cannot come after time in end tag ({})",
        .start.format(DISPLAY_FORMAT),
        .end.format(DISPLAY_FORMAT)
    )]
    ChronologyViolation {
        start: NaiveDateTime,
        end: NaiveDateTime,
    },

    /// The markup itself is not well-formed.
    #[error("impossible to parse input at byte {position}: {reason}")]
    StreamSyntax { position: u64, reason: String },

    /// The underlying stream could not be read.
    #[error("failed to read input: {0}")]
    Io(#[source] Arc<io::Error>),
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    #[test]
    fn chronology_violation_message_shows_both_instants() {
        let start = NaiveDate::from_ymd_opt(2020, 1, 1)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap();
        let end = NaiveDate::from_ymd_opt(2000, 1, 1)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap();

        let err = ExtractError::ChronologyViolation { start, end };

        assert_eq!(
            err.to_string(),
            "time in start tag (01-01-2020 10:00:00) cannot come after time in end tag (01-01-2000 10:00:00)"
        );
    }

    #[test]
    fn malformed_timestamp_message_carries_pattern_and_text() {
        let err = ExtractError::MalformedTimestamp {
            pattern: "%d-%m-%Y %H:%M:%S".to_string(),
            text: "21-12-2011 10:55".to_string(),
        };

        assert_eq!(
            err.to_string(),
            "'21-12-2011 10:55' does not match datetime pattern '%d-%m-%Y %H:%M:%S'"
        );
    }
}
