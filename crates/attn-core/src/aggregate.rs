//! Duration totals per day and per (day, employee).
//!
//! Every interval counts wholly towards the day it starts on, including
//! intervals that run past midnight. Totals are whole seconds.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::interval::AttendanceInterval;

/// Seconds of attendance per calendar day, ascending by day.
pub type DurationByDay = BTreeMap<NaiveDate, i64>;

/// Seconds of attendance per (day, employee), ascending by day then name.
pub type DurationByDayAndEmployee = BTreeMap<(NaiveDate, String), i64>;

/// Sums interval durations by start day.
///
/// Stops at the first error and returns it unchanged.
pub fn by_day<I, E>(intervals: I) -> Result<DurationByDay, E>
where
    I: IntoIterator<Item = Result<AttendanceInterval, E>>,
{
    let mut totals = DurationByDay::new();
    for interval in intervals {
        let interval = interval?;
        *totals.entry(interval.day()).or_default() += interval.duration_seconds();
    }
    tracing::debug!(days = totals.len(), "aggregated by day");
    Ok(totals)
}

/// Sums interval durations by start day and employee name.
///
/// Stops at the first error and returns it unchanged.
pub fn by_day_and_employee<I, E>(intervals: I) -> Result<DurationByDayAndEmployee, E>
where
    I: IntoIterator<Item = Result<AttendanceInterval, E>>,
{
    let mut totals = DurationByDayAndEmployee::new();
    for interval in intervals {
        let interval = interval?;
        let seconds = interval.duration_seconds();
        *totals
            .entry((interval.day(), interval.employee_name().to_string()))
            .or_default() += seconds;
    }
    tracing::debug!(buckets = totals.len(), "aggregated by day and employee");
    Ok(totals)
}
