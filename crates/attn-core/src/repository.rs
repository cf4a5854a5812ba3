//! Cached, filterable access to the intervals of one source.

use std::collections::BTreeSet;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::error::ExtractError;
use crate::interval::AttendanceInterval;
use crate::source::AttendanceSource;

/// Which intervals to keep.
///
/// All set criteria must hold. Bounds compare raw instants: an interval that
/// straddles a bound is dropped whole, never clipped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IntervalFilter {
    /// Allowed employee names; empty allows everyone.
    pub names: BTreeSet<String>,
    /// Inclusive lower bound on the interval start.
    pub start: Option<NaiveDateTime>,
    /// Inclusive upper bound on the interval end.
    pub end: Option<NaiveDateTime>,
}

impl IntervalFilter {
    #[must_use]
    pub fn with_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.names.extend(names.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub const fn with_start(mut self, start: NaiveDateTime) -> Self {
        self.start = Some(start);
        self
    }

    #[must_use]
    pub const fn with_end(mut self, end: NaiveDateTime) -> Self {
        self.end = Some(end);
        self
    }

    /// Keeps intervals starting at or after midnight of `date`.
    #[must_use]
    pub fn with_start_date(self, date: NaiveDate) -> Self {
        self.with_start(date.and_time(NaiveTime::default()))
    }

    /// Keeps intervals ending no later than the last instant of `date`.
    #[must_use]
    pub fn with_end_date(self, date: NaiveDate) -> Self {
        let end_of_day = date
            .and_hms_nano_opt(23, 59, 59, 999_999_999)
            .expect("23:59:59.999999999 is a valid time of day");
        self.with_end(end_of_day)
    }

    /// Whether nothing would be filtered out.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty() && self.start.is_none() && self.end.is_none()
    }

    pub fn matches(&self, interval: &AttendanceInterval) -> bool {
        if !self.names.is_empty() && !self.names.contains(interval.employee_name()) {
            return false;
        }
        self.start.is_none_or(|start| start <= interval.start())
            && self.end.is_none_or(|end| end >= interval.end())
    }
}

/// Intervals pulled so far plus whatever is left of the single extraction.
struct Cache<S: AttendanceSource> {
    source: Option<S>,
    cursor: Option<S::Intervals>,
    seen: Vec<AttendanceInterval>,
    failure: Option<ExtractError>,
}

/// Wraps a source so it is read once and can be filtered many times.
///
/// The first pass is lazy: intervals are recorded as they are pulled. Later
/// passes replay the recorded prefix and then resume the same extraction, so
/// the input is never read twice. A failure is recorded and reported again,
/// after the replayed prefix, to every later pass.
pub struct IntervalRepository<S: AttendanceSource> {
    cache: Cache<S>,
}

impl<S: AttendanceSource> IntervalRepository<S> {
    pub fn new(source: S) -> Self {
        Self {
            cache: Cache {
                source: Some(source),
                cursor: None,
                seen: Vec::new(),
                failure: None,
            },
        }
    }

    /// Every interval of the source, in source order.
    pub fn all_intervals(&mut self) -> Replay<'_, S> {
        if let Some(source) = self.cache.source.take() {
            tracing::debug!("reading attendance source");
            self.cache.cursor = Some(source.read_attendance());
        }
        Replay {
            cache: &mut self.cache,
            position: 0,
            failure_reported: false,
        }
    }

    /// The intervals accepted by `filter`. Errors pass through unfiltered.
    pub fn filtered_intervals(
        &mut self,
        filter: IntervalFilter,
    ) -> impl Iterator<Item = Result<AttendanceInterval, ExtractError>> {
        if !filter.is_empty() {
            tracing::debug!(?filter, "filtering intervals");
        }
        self.all_intervals()
            .filter(move |item| item.as_ref().map_or(true, |interval| filter.matches(interval)))
    }
}

/// One pass over an [`IntervalRepository`].
pub struct Replay<'a, S: AttendanceSource> {
    cache: &'a mut Cache<S>,
    position: usize,
    failure_reported: bool,
}

impl<S: AttendanceSource> Iterator for Replay<'_, S> {
    type Item = Result<AttendanceInterval, ExtractError>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(interval) = self.cache.seen.get(self.position) {
            self.position += 1;
            return Some(Ok(interval.clone()));
        }

        if self.cache.cursor.is_some() {
            match self.cache.cursor.as_mut().and_then(Iterator::next) {
                Some(Ok(interval)) => {
                    self.cache.seen.push(interval.clone());
                    self.position += 1;
                    return Some(Ok(interval));
                }
                Some(Err(err)) => {
                    self.cache.cursor = None;
                    self.cache.failure = Some(err.clone());
                    self.failure_reported = true;
                    return Some(Err(err));
                }
                None => {
                    tracing::debug!(intervals = self.cache.seen.len(), "source drained");
                    self.cache.cursor = None;
                }
            }
        }

        if self.failure_reported {
            return None;
        }
        self.failure_reported = true;
        self.cache.failure.clone().map(Err)
    }
}
