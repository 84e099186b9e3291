//! Strategy driver — per-bar orchestration.
//!
//! For each bar, in order: feed the indicator pipeline; if the snapshot is
//! still invalid, do nothing and advance; otherwise look up the event
//! catalog, score the bar, and run the lifecycle transition check. At most
//! one order intent leaves per bar, and the driver never alters lifecycle
//! state on warmup bars.

use crate::domain::{Bar, OrderIntent, SkippedEntry, TradeRecord, TradingCalendar};
use crate::events::EventCatalog;
use crate::indicators::{IndicatorPipeline, IndicatorSnapshot};
use crate::risk::{LifecycleManager, Position};
use crate::signal::score;
use crate::strategy::{ParamsError, StrategyParams};
use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StrategyError {
    #[error("bar {date} arrived out of order (previous bar {prev})")]
    OutOfOrderBar { prev: NaiveDate, date: NaiveDate },

    #[error("bar {date} failed OHLC sanity checks")]
    InsaneBar { date: NaiveDate },
}

pub struct StrategyDriver {
    params: StrategyParams,
    pipeline: IndicatorPipeline,
    catalog: EventCatalog,
    calendar: TradingCalendar,
    lifecycle: LifecycleManager,
    prev_snapshot: Option<IndicatorSnapshot>,
    last_date: Option<NaiveDate>,
}

impl StrategyDriver {
    pub fn new(
        params: StrategyParams,
        catalog: EventCatalog,
        calendar: TradingCalendar,
    ) -> Result<Self, ParamsError> {
        params.validate()?;
        Ok(Self {
            pipeline: IndicatorPipeline::new(&params),
            lifecycle: LifecycleManager::new(params.clone()),
            params,
            catalog,
            calendar,
            prev_snapshot: None,
            last_date: None,
        })
    }

    /// Bars consumed before the first bar can be scored.
    pub fn warmup_bars(&self) -> usize {
        self.pipeline.warmup_bars()
    }

    pub fn position(&self) -> &Position {
        self.lifecycle.position()
    }

    pub fn trade_log(&self) -> &[TradeRecord] {
        self.lifecycle.trade_log()
    }

    pub fn skipped_entries(&self) -> &[SkippedEntry] {
        self.lifecycle.skipped_entries()
    }

    /// Process one bar. Returns the single order intent for this bar, if any.
    pub fn on_bar(&mut self, bar: &Bar) -> Result<Option<OrderIntent>, StrategyError> {
        if let Some(prev) = self.last_date {
            if bar.date <= prev {
                return Err(StrategyError::OutOfOrderBar {
                    prev,
                    date: bar.date,
                });
            }
        }
        if !bar.is_sane() {
            return Err(StrategyError::InsaneBar { date: bar.date });
        }
        self.last_date = Some(bar.date);

        let Some(snapshot) = self.pipeline.update(bar) else {
            return Ok(None);
        };

        // First valid bar scores against itself: edge-triggered components
        // stay false until a real previous snapshot exists.
        let prev = self.prev_snapshot.unwrap_or(snapshot);
        let events = self.catalog.lookup(bar.date, &self.calendar);
        let signal = score(&prev, &snapshot, &events, bar.close, &self.params);
        let intent = self.lifecycle.on_bar(bar.date, bar.close, &signal);
        self.prev_snapshot = Some(snapshot);
        Ok(intent)
    }

    /// Liquidate any open position at the given bar, used by the host at the
    /// end of a run.
    pub fn close_out(&mut self, bar: &Bar) -> Option<OrderIntent> {
        self.lifecycle.close_out(bar.date, bar.close)
    }
}
