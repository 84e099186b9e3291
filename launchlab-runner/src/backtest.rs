//! Bar replay — the host loop around the strategy driver.
//!
//! Feeds bars strictly in date order, applies order intents as idealized
//! fills at the same bar's close, tracks cash and equity, and liquidates any
//! open position on the final bar. Buys are sized to 95% of available cash
//! in whole shares; fill realism beyond that is out of scope.

use crate::config::RunConfig;
use crate::data::{load_bars, load_launches, LaunchCalendarLoad};
use crate::metrics::PerformanceMetrics;
use anyhow::{Context, Result};
use chrono::NaiveDate;
use launchlab_core::domain::{Bar, OrderAction, OrderIntent, SkippedEntry, TradeRecord, TradingCalendar};
use launchlab_core::events::EventCatalog;
use launchlab_core::strategy::StrategyDriver;
use serde::Serialize;

/// Fraction of cash committed per entry, leaving headroom for whole-share
/// rounding.
const CASH_UTILIZATION: f64 = 0.95;

/// Equity at one bar close.
#[derive(Debug, Clone, Serialize)]
pub struct EquityPoint {
    pub date: NaiveDate,
    pub equity: f64,
}

/// Everything a run produces, exposed read-only for reporting.
#[derive(Debug)]
pub struct BacktestResult {
    pub run_id: String,
    pub equity_curve: Vec<EquityPoint>,
    pub trades: Vec<TradeRecord>,
    pub skipped_entries: Vec<SkippedEntry>,
    pub warnings: Vec<String>,
    pub final_equity: f64,
    pub bar_count: usize,
    pub warmup_bars: usize,
    pub metrics: PerformanceMetrics,
}

/// Simple cash/shares ledger for the idealized fills.
struct Ledger {
    cash: f64,
    shares: f64,
}

impl Ledger {
    fn apply(&mut self, intent: &OrderIntent, bar: &Bar, warnings: &mut Vec<String>) {
        match intent.action {
            OrderAction::Buy => {
                let budget = self.cash * CASH_UTILIZATION;
                let shares = (budget / bar.close).floor();
                if shares < 1.0 {
                    warnings.push(format!(
                        "{}: entry signal filled zero shares (cash {:.2}, close {:.2})",
                        bar.date, self.cash, bar.close
                    ));
                    return;
                }
                self.cash -= shares * bar.close;
                self.shares += shares;
            }
            OrderAction::Sell => {
                self.cash += self.shares * bar.close;
                self.shares = 0.0;
            }
        }
    }

    fn equity(&self, close: f64) -> f64 {
        self.cash + self.shares * close
    }
}

/// Execute a full backtest described by `config`.
pub fn run_backtest(config: &RunConfig) -> Result<BacktestResult> {
    config.validate()?;

    let bars = load_bars(&config.bars, &config.symbol, config.start, config.end)
        .with_context(|| format!("loading bars from {}", config.bars.display()))?;

    let LaunchCalendarLoad {
        events,
        mut warnings,
    } = match &config.launches {
        Some(path) => load_launches(path)
            .with_context(|| format!("loading launch calendar from {}", path.display()))?,
        None => LaunchCalendarLoad::default(),
    };

    let calendar = TradingCalendar::from_dates(bars.iter().map(|b| b.date));
    let mut driver = StrategyDriver::new(config.strategy.clone(), EventCatalog::new(events), calendar)
        .context("building strategy driver")?;
    let warmup_bars = driver.warmup_bars();

    let mut ledger = Ledger {
        cash: config.initial_capital,
        shares: 0.0,
    };
    let mut equity_curve = Vec::with_capacity(bars.len());

    for bar in &bars {
        let intent = driver
            .on_bar(bar)
            .with_context(|| format!("processing bar {}", bar.date))?;
        if let Some(intent) = intent {
            ledger.apply(&intent, bar, &mut warnings);
        }
        equity_curve.push(EquityPoint {
            date: bar.date,
            equity: ledger.equity(bar.close),
        });
    }

    // End of run: flatten whatever is still open so the trade log is
    // complete and equity is all cash.
    if let Some(last) = bars.last() {
        if let Some(intent) = driver.close_out(last) {
            ledger.apply(&intent, last, &mut warnings);
            if let Some(point) = equity_curve.last_mut() {
                point.equity = ledger.equity(last.close);
            }
        }
    }

    let equity_values: Vec<f64> = equity_curve.iter().map(|p| p.equity).collect();
    let trades = driver.trade_log().to_vec();
    let metrics = PerformanceMetrics::compute(&equity_values, &trades);
    let final_equity = equity_values.last().copied().unwrap_or(config.initial_capital);

    Ok(BacktestResult {
        run_id: config.run_id(),
        equity_curve,
        trades,
        skipped_entries: driver.skipped_entries().to_vec(),
        warnings,
        final_equity,
        bar_count: bars.len(),
        warmup_bars,
        metrics,
    })
}
