//! Launchlab core — strategy engine for launch-calendar swing trading.
//!
//! This crate contains the designed logic of the system:
//! - Domain types (bars, trading calendar, order intents, trade records)
//! - Streaming indicator pipeline (RSI, MACD, dual SMA, Bollinger Bands)
//! - Launch-event catalog with trading-day window lookups
//! - Seven-component composite signal scorer
//! - Position lifecycle state machine (stop-loss, trailing stop, take-profit,
//!   time stop, weekly entry cap)
//! - Per-bar strategy driver that ties the above together
//!
//! The core performs no I/O. Bars arrive one at a time from a host (see
//! `launchlab-runner`), and at most one order intent leaves per bar.

pub mod domain;
pub mod events;
pub mod indicators;
pub mod risk;
pub mod signal;
pub mod strategy;

pub use domain::{Bar, ExitReason, OrderAction, OrderIntent, TradeRecord, TradingCalendar};
pub use events::{EventCatalog, EventView, LaunchEvent, LaunchOutcome};
pub use indicators::{IndicatorPipeline, IndicatorSnapshot};
pub use risk::{LifecycleManager, Position, PositionStatus};
pub use signal::{score, SignalScore};
pub use strategy::{StrategyDriver, StrategyError, StrategyParams};
