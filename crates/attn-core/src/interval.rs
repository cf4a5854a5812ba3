//! Validated attendance intervals.

use chrono::{NaiveDate, NaiveDateTime};

use crate::error::ExtractError;

/// One employee's presence from `start` to `end`.
///
/// The only constructor rejects `start > end`, so every value in circulation
/// satisfies `start <= end`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AttendanceInterval {
    employee_name: String,
    start: NaiveDateTime,
    end: NaiveDateTime,
}

impl AttendanceInterval {
    /// Creates an interval, failing with `ChronologyViolation` when the start
    /// comes after the end.
    pub fn new(
        employee_name: impl Into<String>,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<Self, ExtractError> {
        if start > end {
            return Err(ExtractError::ChronologyViolation { start, end });
        }
        Ok(Self {
            employee_name: employee_name.into(),
            start,
            end,
        })
    }

    pub fn employee_name(&self) -> &str {
        &self.employee_name
    }

    pub const fn start(&self) -> NaiveDateTime {
        self.start
    }

    pub const fn end(&self) -> NaiveDateTime {
        self.end
    }

    /// Calendar day the interval is attributed to (the day it starts on).
    pub fn day(&self) -> NaiveDate {
        self.start.date()
    }

    /// Length of the interval in whole seconds, sub-second remainder dropped.
    pub fn duration_seconds(&self) -> i64 {
        (self.end - self.start).num_seconds()
    }
}
