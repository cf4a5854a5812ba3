//! CSV rendering of aggregated totals.
//!
//! Both schemas start with a header row, use CRLF line endings, print dates
//! as `dd-mm-yyyy` and durations as `[D day[s], ]H:MM:SS`.

use std::io::Write;

use chrono::NaiveDate;
use csv::{Terminator, WriterBuilder};

use crate::aggregate::{DurationByDay, DurationByDayAndEmployee};

const DATE_FORMAT: &str = "%d-%m-%Y";

const SECONDS_PER_DAY: i64 = 24 * 60 * 60;

/// Formats seconds as elapsed time: `2:00:00`, `1 day, 0:00:05`,
/// `3 days, 10:00:00`.
pub fn format_duration(seconds: i64) -> String {
    let days = seconds.div_euclid(SECONDS_PER_DAY);
    let rest = seconds.rem_euclid(SECONDS_PER_DAY);
    let clock = format!("{}:{:02}:{:02}", rest / 3600, rest % 3600 / 60, rest % 60);

    match days {
        0 => clock,
        1 | -1 => format!("{days} day, {clock}"),
        _ => format!("{days} days, {clock}"),
    }
}

fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Writes `date,duration` rows, one per day, ascending.
pub fn write_by_day<W: Write>(out: W, totals: &DurationByDay) -> csv::Result<()> {
    let mut writer = WriterBuilder::new()
        .terminator(Terminator::CRLF)
        .from_writer(out);
    writer.write_record(["date", "duration"])?;
    for (&date, &seconds) in totals {
        writer.write_record([format_date(date), format_duration(seconds)])?;
    }
    writer.flush()?;
    tracing::debug!(rows = totals.len(), "wrote daily report");
    Ok(())
}

/// Writes `date,name,duration` rows, ascending by day then name.
pub fn write_by_day_and_employee<W: Write>(
    out: W,
    totals: &DurationByDayAndEmployee,
) -> csv::Result<()> {
    let mut writer = WriterBuilder::new()
        .terminator(Terminator::CRLF)
        .from_writer(out);
    writer.write_record(["date", "name", "duration"])?;
    for ((date, name), &seconds) in totals {
        writer.write_record([
            format_date(*date).as_str(),
            name.as_str(),
            format_duration(seconds).as_str(),
        ])?;
    }
    writer.flush()?;
    tracing::debug!(rows = totals.len(), "wrote grouped report");
    Ok(())
}
