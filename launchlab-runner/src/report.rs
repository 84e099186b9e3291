//! Artifact export: trade tape (CSV/JSON) and run summary (JSON).

use crate::backtest::BacktestResult;
use crate::config::RunConfig;
use anyhow::{Context, Result};
use launchlab_core::domain::{SkippedEntry, TradeRecord};
use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::Path;

#[derive(Serialize)]
struct RunSummary<'a> {
    run_id: &'a str,
    symbol: &'a str,
    initial_capital: f64,
    final_equity: f64,
    bar_count: usize,
    warmup_bars: usize,
    metrics: &'a crate::metrics::PerformanceMetrics,
    warnings: &'a [String],
    skipped_entries: &'a [SkippedEntry],
}

/// Write `trades.csv`, `trades.json`, `equity.csv` and `summary.json` into
/// `dir`, creating it if needed.
pub fn save_artifacts(dir: &Path, config: &RunConfig, result: &BacktestResult) -> Result<()> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("creating output directory {}", dir.display()))?;

    write_trades_csv(&dir.join("trades.csv"), &result.trades)?;
    write_trades_json(&dir.join("trades.json"), &result.trades)?;
    write_equity_csv(&dir.join("equity.csv"), result)?;

    let summary = RunSummary {
        run_id: &result.run_id,
        symbol: &config.symbol,
        initial_capital: config.initial_capital,
        final_equity: result.final_equity,
        bar_count: result.bar_count,
        warmup_bars: result.warmup_bars,
        metrics: &result.metrics,
        warnings: &result.warnings,
        skipped_entries: &result.skipped_entries,
    };
    let json = serde_json::to_string_pretty(&summary).context("serializing run summary")?;
    std::fs::write(dir.join("summary.json"), json)
        .with_context(|| format!("writing summary.json in {}", dir.display()))?;

    Ok(())
}

fn write_trades_csv(path: &Path, trades: &[TradeRecord]) -> Result<()> {
    let mut file = File::create(path)
        .with_context(|| format!("creating trades CSV {}", path.display()))?;

    writeln!(
        file,
        "entry_date,exit_date,exit_reason,entry_price,exit_price,pnl_pct,days_held,score"
    )?;
    for trade in trades {
        writeln!(
            file,
            "{},{},{},{:.4},{:.4},{:.4},{},{}",
            trade.entry_date,
            trade.exit_date,
            trade.exit_reason.as_str(),
            trade.entry_price,
            trade.exit_price,
            trade.pnl_pct,
            trade.days_held,
            trade.score_at_entry.total()
        )?;
    }
    Ok(())
}

fn write_trades_json(path: &Path, trades: &[TradeRecord]) -> Result<()> {
    let json = serde_json::to_string_pretty(trades).context("serializing trades")?;
    std::fs::write(path, json)
        .with_context(|| format!("writing trades JSON {}", path.display()))?;
    Ok(())
}

fn write_equity_csv(path: &Path, result: &BacktestResult) -> Result<()> {
    let mut file = File::create(path)
        .with_context(|| format!("creating equity CSV {}", path.display()))?;
    writeln!(file, "date,equity")?;
    for point in &result.equity_curve {
        writeln!(file, "{},{:.4}", point.date, point.equity)?;
    }
    Ok(())
}
