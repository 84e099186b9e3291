//! Position lifecycle management.
//!
//! The lifecycle manager exclusively owns the position, the weekly entry
//! counter and the trade log. No other component mutates them, which keeps
//! the state machine testable in isolation and re-runnable per backtest.

pub mod lifecycle;
pub mod position;
pub mod weekly;

pub use lifecycle::LifecycleManager;
pub use position::{Position, PositionStatus};
pub use weekly::WeeklyTradeCounter;
