//! Weekly entry counter — caps new entries per ISO calendar week.
//!
//! The counter resets when the bar date's ISO (year, week) changes and
//! increments exactly once per entry transition. Exits never decrement it.

use chrono::{Datelike, NaiveDate};

#[derive(Debug, Clone)]
pub struct WeeklyTradeCounter {
    cap: u32,
    current_week: Option<(i32, u32)>,
    count: u32,
}

impl WeeklyTradeCounter {
    pub fn new(cap: u32) -> Self {
        Self {
            cap,
            current_week: None,
            count: 0,
        }
    }

    /// Advance to `date`, resetting the count when the ISO week changes.
    pub fn roll_over(&mut self, date: NaiveDate) {
        let week = (date.iso_week().year(), date.iso_week().week());
        if self.current_week != Some(week) {
            self.current_week = Some(week);
            self.count = 0;
        }
    }

    pub fn at_cap(&self) -> bool {
        self.count >= self.cap
    }

    pub fn record_entry(&mut self) {
        self.count += 1;
    }

    /// Entries recorded in the current week.
    pub fn count(&self) -> u32 {
        self.count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, month, day).unwrap()
    }

    #[test]
    fn six_attempts_allow_exactly_five() {
        let mut counter = WeeklyTradeCounter::new(5);
        // All of 2024-01-01..07 is ISO week 1.
        let mut entered = 0;
        for day in 1..=6 {
            counter.roll_over(d(1, day));
            if !counter.at_cap() {
                counter.record_entry();
                entered += 1;
            }
        }
        assert_eq!(entered, 5);
        assert!(counter.at_cap());
    }

    #[test]
    fn resets_on_new_iso_week() {
        let mut counter = WeeklyTradeCounter::new(5);
        counter.roll_over(d(1, 5)); // Friday, week 1
        for _ in 0..5 {
            counter.record_entry();
        }
        assert!(counter.at_cap());

        counter.roll_over(d(1, 8)); // Monday, week 2
        assert!(!counter.at_cap());
        assert_eq!(counter.count(), 0);
    }

    #[test]
    fn same_week_across_roll_overs_keeps_count() {
        let mut counter = WeeklyTradeCounter::new(5);
        counter.roll_over(d(1, 1));
        counter.record_entry();
        counter.roll_over(d(1, 3));
        counter.roll_over(d(1, 5));
        assert_eq!(counter.count(), 1);
    }

    #[test]
    fn iso_week_boundary_at_year_end() {
        let mut counter = WeeklyTradeCounter::new(5);
        // 2024-12-30 (Mon) and 2025-01-03 (Fri) share ISO week 2025-W01.
        counter.roll_over(NaiveDate::from_ymd_opt(2024, 12, 30).unwrap());
        counter.record_entry();
        counter.roll_over(NaiveDate::from_ymd_opt(2025, 1, 3).unwrap());
        assert_eq!(counter.count(), 1);
    }
}
