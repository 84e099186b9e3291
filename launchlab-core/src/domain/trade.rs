//! Trade log records — append-only audit trail of every round trip.

use crate::signal::SignalScore;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Why an open position was closed.
///
/// When several exit conditions hold on the same bar, the lifecycle manager
/// resolves them in a fixed priority order and records exactly one reason.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExitReason {
    StopLoss,
    TrailingStop,
    TakeProfit,
    TimeStop,
    /// Host-requested liquidation on the final bar of a run.
    EndOfRun,
}

impl ExitReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::StopLoss => "stop_loss",
            Self::TrailingStop => "trailing_stop",
            Self::TakeProfit => "take_profit",
            Self::TimeStop => "time_stop",
            Self::EndOfRun => "end_of_run",
        }
    }
}

/// A complete round-trip trade: entry to exit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TradeRecord {
    pub entry_date: NaiveDate,
    pub exit_date: NaiveDate,
    pub exit_reason: ExitReason,
    pub entry_price: f64,
    pub exit_price: f64,
    /// (exit - entry) / entry.
    pub pnl_pct: f64,
    /// Bars the position was held before the exit bar.
    pub days_held: u32,
    /// The composite score that triggered the entry, kept for reporting.
    pub score_at_entry: SignalScore,
}

impl TradeRecord {
    pub fn is_winner(&self) -> bool {
        self.pnl_pct > 0.0
    }
}

/// Why a qualifying entry signal was not acted on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// A position was already open on this bar.
    PositionOpen,
    /// The weekly entry cap was already reached.
    WeeklyCapReached,
}

/// Diagnostic record of a rejected entry. Exposed read-only by the lifecycle
/// manager so hosts can report why signal-qualified bars produced no trade.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkippedEntry {
    pub date: NaiveDate,
    pub reason: SkipReason,
    pub score_total: u8,
}
