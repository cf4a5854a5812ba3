//! Pluggable producers of attendance intervals.

use crate::error::ExtractError;
use crate::interval::AttendanceInterval;

/// Anything that can turn an input handle into a sequence of intervals.
///
/// The sequence is lazy and single-pass: reading again means building a new
/// source over a fresh handle. Callers that need several passes go through
/// [`IntervalRepository`](crate::IntervalRepository), which caches the first.
pub trait AttendanceSource {
    /// The lazy interval sequence this source produces.
    type Intervals: Iterator<Item = Result<AttendanceInterval, ExtractError>>;

    /// Starts reading. Consumes the source, so it runs at most once.
    fn read_attendance(self) -> Self::Intervals;
}

type Wrap = fn(AttendanceInterval) -> Result<AttendanceInterval, ExtractError>;

/// Already-extracted intervals, e.g. from a previous run or a test fixture.
impl AttendanceSource for Vec<AttendanceInterval> {
    type Intervals = std::iter::Map<std::vec::IntoIter<AttendanceInterval>, Wrap>;

    fn read_attendance(self) -> Self::Intervals {
        self.into_iter().map(Ok as Wrap)
    }
}
