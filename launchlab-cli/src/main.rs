//! Launchlab CLI — run backtests and inspect launch calendars.
//!
//! Commands:
//! - `run` — execute a backtest from a TOML config file and write artifacts
//! - `calendar` — parse a launch calendar CSV and report its contents

use anyhow::Result;
use clap::{Parser, Subcommand};
use launchlab_core::events::LaunchOutcome;
use launchlab_runner::{load_launches, run_backtest, save_artifacts, RunConfig};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "launchlab", about = "Launch-calendar swing strategy backtester")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Execute a backtest from a TOML config file.
    Run {
        /// Path to the TOML run config.
        #[arg(long)]
        config: PathBuf,

        /// Output directory for artifacts (trades, equity, summary).
        #[arg(long, default_value = "results")]
        output_dir: PathBuf,
    },
    /// Parse a launch calendar CSV and report events and warnings.
    Calendar {
        /// Path to the launch calendar CSV.
        #[arg(long)]
        launches: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Run { config, output_dir } => run_cmd(&config, &output_dir),
        Commands::Calendar { launches } => calendar_cmd(&launches),
    }
}

fn run_cmd(config_path: &std::path::Path, output_dir: &std::path::Path) -> Result<()> {
    let config = RunConfig::from_toml_file(config_path)?;
    let result = run_backtest(&config)?;

    println!("run {}", result.run_id);
    println!(
        "  {} bars ({} warmup), {} trades, {} skipped entries",
        result.bar_count,
        result.warmup_bars,
        result.trades.len(),
        result.skipped_entries.len()
    );
    println!(
        "  final equity {:.2} (return {:+.2}%, max drawdown {:.2}%)",
        result.final_equity,
        result.metrics.total_return * 100.0,
        result.metrics.max_drawdown * 100.0
    );
    println!(
        "  win rate {:.0}%, avg hold {:.1} bars",
        result.metrics.win_rate * 100.0,
        result.metrics.avg_days_held
    );
    for (reason, count) in &result.metrics.exit_reasons {
        println!("    {reason}: {count}");
    }
    for warning in &result.warnings {
        println!("  warning: {warning}");
    }

    let out = output_dir.join(&result.run_id[..12]);
    save_artifacts(&out, &config, &result)?;
    println!("artifacts written to {}", out.display());
    Ok(())
}

fn calendar_cmd(path: &std::path::Path) -> Result<()> {
    let load = load_launches(path)?;
    let count_of = |outcome: LaunchOutcome| {
        load.events
            .iter()
            .filter(|e| e.outcome == outcome)
            .count()
    };
    println!(
        "{} events: {} success, {} failure, {} scheduled",
        load.events.len(),
        count_of(LaunchOutcome::Success),
        count_of(LaunchOutcome::Failure),
        count_of(LaunchOutcome::Scheduled)
    );
    let earliest = load.events.iter().map(|e| e.date).min();
    let latest = load.events.iter().map(|e| e.date).max();
    if let (Some(earliest), Some(latest)) = (earliest, latest) {
        println!("  spanning {earliest} to {latest}");
    }
    for warning in &load.warnings {
        println!("  warning: {warning}");
    }
    Ok(())
}
