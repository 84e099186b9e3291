//! Position state. At most one position is open at any time.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PositionStatus {
    Flat,
    Open,
}

/// The single tracked position.
///
/// Invariants while `Open`:
/// - `quantity > 0` and `entry_price > 0`
/// - `highest_price_since_entry >= entry_price`
/// - `trailing_stop_price` is set only once unrealized gain reaches the arm
///   threshold and never decreases afterwards
/// - `days_held` increments exactly once per held bar and resets on entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Position {
    pub status: PositionStatus,
    pub entry_date: Option<NaiveDate>,
    pub entry_price: f64,
    pub quantity: f64,
    pub highest_price_since_entry: f64,
    pub trailing_stop_price: Option<f64>,
    pub days_held: u32,
}

impl Position {
    pub fn flat() -> Self {
        Self {
            status: PositionStatus::Flat,
            entry_date: None,
            entry_price: 0.0,
            quantity: 0.0,
            highest_price_since_entry: 0.0,
            trailing_stop_price: None,
            days_held: 0,
        }
    }

    pub fn open(entry_date: NaiveDate, entry_price: f64, quantity: f64) -> Self {
        Self {
            status: PositionStatus::Open,
            entry_date: Some(entry_date),
            entry_price,
            quantity,
            highest_price_since_entry: entry_price,
            trailing_stop_price: None,
            days_held: 0,
        }
    }

    pub fn is_open(&self) -> bool {
        self.status == PositionStatus::Open
    }

    /// Unrealized return as a fraction of the entry price. Zero while flat.
    pub fn unrealized_pnl_pct(&self, close: f64) -> f64 {
        if !self.is_open() || self.entry_price <= 0.0 {
            return 0.0;
        }
        (close - self.entry_price) / self.entry_price
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::flat()
    }
}
