//! Core logic of the attendance analyzer.
//!
//! This crate contains:
//! - Extraction: a streaming, validating reader of `<people>` XML documents
//! - Repository: read-once caching and name/date filtering of intervals
//! - Aggregation: duration totals per day or per (day, employee)
//! - Writer: the CSV report schemas

pub mod aggregate;
mod error;
pub mod extract;
mod interval;
mod repository;
mod source;
pub mod timestamp;
pub mod writer;

pub use aggregate::{DurationByDay, DurationByDayAndEmployee, by_day, by_day_and_employee};
pub use error::ExtractError;
pub use extract::{AttendanceExtractor, XmlAttendanceSource};
pub use interval::AttendanceInterval;
pub use repository::{IntervalFilter, IntervalRepository, Replay};
pub use source::AttendanceSource;
pub use timestamp::{DEFAULT_DATE_PATTERN, DEFAULT_DATETIME_PATTERN, parse_date, parse_timestamp};
