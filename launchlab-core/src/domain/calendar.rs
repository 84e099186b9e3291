//! Trading calendar — the ordered set of trading dates for a run.
//!
//! Built from the bar dates the host loads, so "N trading days" always means
//! N bars, matching the day-count semantics used everywhere else in the core.
//! Knowing future trading *dates* is calendar knowledge, not price look-ahead.

use chrono::NaiveDate;

/// Sorted, deduplicated set of trading dates.
#[derive(Debug, Clone, Default)]
pub struct TradingCalendar {
    dates: Vec<NaiveDate>,
}

impl TradingCalendar {
    /// Build a calendar from an arbitrary collection of dates.
    pub fn from_dates(dates: impl IntoIterator<Item = NaiveDate>) -> Self {
        let mut dates: Vec<NaiveDate> = dates.into_iter().collect();
        dates.sort_unstable();
        dates.dedup();
        Self { dates }
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.dates.binary_search(&date).is_ok()
    }

    /// Number of trading dates in the range `(from, to]`.
    ///
    /// `days_since(launch, today)` is 0 when the launch happened today and
    /// counts one per trading day thereafter, regardless of weekends or
    /// holidays between.
    pub fn days_since(&self, from: NaiveDate, to: NaiveDate) -> u32 {
        if to < from {
            return 0;
        }
        let lo = self.dates.partition_point(|&d| d <= from);
        let hi = self.dates.partition_point(|&d| d <= to);
        (hi - lo) as u32
    }

    /// Trading-day distance from `from` to a future event date.
    ///
    /// Counts the trading dates strictly between the two, plus one for the
    /// event itself. An event on the next trading date is 1 day ahead; an
    /// event on a non-trading date (weekend launches happen) lands at the
    /// distance of the first trading date after the gap.
    pub fn days_until(&self, from: NaiveDate, event: NaiveDate) -> u32 {
        if event <= from {
            return 0;
        }
        let lo = self.dates.partition_point(|&d| d <= from);
        let hi = self.dates.partition_point(|&d| d < event);
        (hi - lo) as u32 + 1
    }
}
