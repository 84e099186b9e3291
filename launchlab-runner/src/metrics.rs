//! Performance metrics — pure functions that compute run statistics.
//!
//! Every metric is a pure function: equity curve and/or trade list in,
//! scalar out. No dependencies on the replay loop or the data layer.

use launchlab_core::domain::TradeRecord;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Aggregate performance metrics for a single backtest run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerformanceMetrics {
    pub total_return: f64,
    /// Deepest peak-to-trough loss as a non-positive fraction.
    pub max_drawdown: f64,
    pub win_rate: f64,
    pub profit_factor: f64,
    pub trade_count: usize,
    pub avg_days_held: f64,
    /// Trades per exit reason, keyed by the reason's wire name.
    pub exit_reasons: BTreeMap<String, usize>,
}

impl PerformanceMetrics {
    pub fn compute(equity_curve: &[f64], trades: &[TradeRecord]) -> Self {
        Self {
            total_return: total_return(equity_curve),
            max_drawdown: max_drawdown(equity_curve),
            win_rate: win_rate(trades),
            profit_factor: profit_factor(trades),
            trade_count: trades.len(),
            avg_days_held: avg_days_held(trades),
            exit_reasons: exit_reason_counts(trades),
        }
    }
}

/// Total return as a fraction: (final - initial) / initial.
pub fn total_return(equity_curve: &[f64]) -> f64 {
    let (Some(&initial), Some(&last)) = (equity_curve.first(), equity_curve.last()) else {
        return 0.0;
    };
    if initial <= 0.0 {
        return 0.0;
    }
    (last - initial) / initial
}

/// Deepest drawdown from a running peak, as a non-positive fraction.
pub fn max_drawdown(equity_curve: &[f64]) -> f64 {
    let mut peak = f64::NEG_INFINITY;
    let mut worst = 0.0f64;
    for &equity in equity_curve {
        peak = peak.max(equity);
        if peak > 0.0 {
            worst = worst.min((equity - peak) / peak);
        }
    }
    worst
}

/// Fraction of trades with positive return. Zero when there are no trades.
pub fn win_rate(trades: &[TradeRecord]) -> f64 {
    if trades.is_empty() {
        return 0.0;
    }
    trades.iter().filter(|t| t.is_winner()).count() as f64 / trades.len() as f64
}

/// Gross winning return over gross losing return.
///
/// Infinite when there are wins but no losses; zero with no trades.
pub fn profit_factor(trades: &[TradeRecord]) -> f64 {
    let gross_win: f64 = trades.iter().map(|t| t.pnl_pct.max(0.0)).sum();
    let gross_loss: f64 = trades.iter().map(|t| (-t.pnl_pct).max(0.0)).sum();
    if gross_loss > 0.0 {
        gross_win / gross_loss
    } else if gross_win > 0.0 {
        f64::INFINITY
    } else {
        0.0
    }
}

/// Mean holding period in bars. Zero when there are no trades.
pub fn avg_days_held(trades: &[TradeRecord]) -> f64 {
    if trades.is_empty() {
        return 0.0;
    }
    trades.iter().map(|t| t.days_held as f64).sum::<f64>() / trades.len() as f64
}

/// Trade count per exit reason, keyed by wire name (`stop_loss`, ...).
pub fn exit_reason_counts(trades: &[TradeRecord]) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for t in trades {
        *counts.entry(t.exit_reason.as_str().to_string()).or_insert(0) += 1;
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use launchlab_core::domain::ExitReason;
    use launchlab_core::signal::SignalScore;

    fn trade(pnl_pct: f64, days_held: u32, exit_reason: ExitReason) -> TradeRecord {
        let entry_date = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        TradeRecord {
            entry_date,
            exit_date: entry_date + chrono::Duration::days(days_held as i64 + 1),
            exit_reason,
            entry_price: 10.0,
            exit_price: 10.0 * (1.0 + pnl_pct),
            pnl_pct,
            days_held,
            score_at_entry: SignalScore::default(),
        }
    }

    #[test]
    fn total_return_basic() {
        assert!((total_return(&[100.0, 110.0, 120.0]) - 0.2).abs() < 1e-12);
        assert_eq!(total_return(&[]), 0.0);
    }

    #[test]
    fn max_drawdown_finds_worst_trough() {
        // Peak 120, trough 90: drawdown -25%.
        let dd = max_drawdown(&[100.0, 120.0, 90.0, 110.0]);
        assert!((dd + 0.25).abs() < 1e-12);
    }

    #[test]
    fn max_drawdown_monotone_curve_is_zero() {
        assert_eq!(max_drawdown(&[100.0, 101.0, 102.0]), 0.0);
    }

    #[test]
    fn win_rate_and_profit_factor() {
        let trades = vec![
            trade(0.10, 3, ExitReason::TakeProfit),
            trade(-0.05, 1, ExitReason::StopLoss),
            trade(0.02, 10, ExitReason::TimeStop),
        ];
        assert!((win_rate(&trades) - 2.0 / 3.0).abs() < 1e-12);
        assert!((profit_factor(&trades) - 0.12 / 0.05).abs() < 1e-9);
    }

    #[test]
    fn profit_factor_without_losses_is_infinite() {
        let trades = vec![trade(0.10, 2, ExitReason::TakeProfit)];
        assert!(profit_factor(&trades).is_infinite());
        assert_eq!(profit_factor(&[]), 0.0);
    }

    #[test]
    fn exit_reason_breakdown() {
        let trades = vec![
            trade(0.10, 3, ExitReason::TakeProfit),
            trade(-0.05, 1, ExitReason::StopLoss),
            trade(-0.06, 2, ExitReason::StopLoss),
        ];
        let counts = exit_reason_counts(&trades);
        assert_eq!(counts["stop_loss"], 2);
        assert_eq!(counts["take_profit"], 1);
    }

    #[test]
    fn compute_aggregates() {
        let trades = vec![trade(0.10, 4, ExitReason::TakeProfit)];
        let metrics = PerformanceMetrics::compute(&[1000.0, 1100.0], &trades);
        assert_eq!(metrics.trade_count, 1);
        assert!((metrics.avg_days_held - 4.0).abs() < 1e-12);
        assert!((metrics.total_return - 0.1).abs() < 1e-12);
    }
}
