//! Launch-event catalog — static reference data for the catalyst signals.
//!
//! The catalog never mutates during a run. Lookups answer two questions for a
//! bar date: is a launch coming up within the hype window, and did a
//! successful launch happen recently? Distances are counted in trading days
//! against the run's [`TradingCalendar`].

use crate::domain::TradingCalendar;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// "Buy the hype" window: launches 1..=5 trading days ahead.
pub const UPCOMING_WINDOW_DAYS: u32 = 5;

/// Post-launch momentum window: 0..=3 trading days after a success.
pub const POST_SUCCESS_WINDOW_DAYS: u32 = 3;

/// Outcome of a calendar entry. Future entries are `Scheduled`; past entries
/// carry how the launch went.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LaunchOutcome {
    Scheduled,
    Success,
    Failure,
}

impl LaunchOutcome {
    /// Case-insensitive parse of the outcome column in calendar files.
    /// Unknown values return `None`; the loader excludes those records.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "scheduled" | "upcoming" => Some(Self::Scheduled),
            "success" => Some(Self::Success),
            "failure" | "failed" => Some(Self::Failure),
            _ => None,
        }
    }
}

/// One rocket launch, past or future.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LaunchEvent {
    pub date: NaiveDate,
    pub mission: String,
    pub outcome: LaunchOutcome,
}

/// Result of a catalog lookup for one bar date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EventView {
    /// Trading days until the nearest future launch, if within 1..=5.
    pub upcoming_launch_in_days: Option<u32>,
    /// Trading days since the nearest successful launch, if within 0..=3.
    pub days_since_successful_launch: Option<u32>,
}

#[derive(Debug, Clone, Default)]
pub struct EventCatalog {
    /// Sorted by date.
    events: Vec<LaunchEvent>,
}

impl EventCatalog {
    pub fn new(mut events: Vec<LaunchEvent>) -> Self {
        events.sort_by_key(|e| e.date);
        Self { events }
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn events(&self) -> &[LaunchEvent] {
        &self.events
    }

    /// Evaluate both event windows for `date`.
    ///
    /// Ties (several events in range) resolve to the nearest event by date.
    /// The upcoming window counts any outcome — hype before a launch does not
    /// depend on a result nobody knows yet. Failed launches never contribute
    /// to the post-launch window.
    pub fn lookup(&self, date: NaiveDate, calendar: &TradingCalendar) -> EventView {
        let split = self.events.partition_point(|e| e.date <= date);

        let upcoming_launch_in_days = self.events[split..]
            .first()
            .map(|e| calendar.days_until(date, e.date))
            .filter(|&d| (1..=UPCOMING_WINDOW_DAYS).contains(&d));

        let days_since_successful_launch = self.events[..split]
            .iter()
            .rev()
            .find(|e| e.outcome == LaunchOutcome::Success)
            .map(|e| calendar.days_since(e.date, date))
            .filter(|&d| d <= POST_SUCCESS_WINDOW_DAYS);

        EventView {
            upcoming_launch_in_days,
            days_since_successful_launch,
        }
    }
}
