//! Serializable backtest configuration.

use chrono::NaiveDate;
use launchlab_core::strategy::{ParamsError, StrategyParams};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid strategy parameters: {0}")]
    Strategy(#[from] ParamsError),

    #[error("initial capital must be positive, got {0}")]
    NonPositiveCapital(f64),

    #[error("start date {start} is after end date {end}")]
    DateRange { start: NaiveDate, end: NaiveDate },
}

/// Configuration for a single backtest run.
///
/// Captures everything needed to reproduce the run: data sources, date
/// clamp, capital, and the full strategy parameter set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    /// Symbol the bar file describes (bar CSVs carry no symbol column).
    pub symbol: String,

    /// Path to the bar CSV (`date,open,high,low,close,volume`).
    pub bars: PathBuf,

    /// Path to the launch calendar CSV (`date,mission,flight_no,outcome`).
    /// Optional: without it the event components simply never fire.
    #[serde(default)]
    pub launches: Option<PathBuf>,

    /// Inclusive start of the replay window. Defaults to the first bar.
    #[serde(default)]
    pub start: Option<NaiveDate>,

    /// Inclusive end of the replay window. Defaults to the last bar.
    #[serde(default)]
    pub end: Option<NaiveDate>,

    #[serde(default = "default_initial_capital")]
    pub initial_capital: f64,

    #[serde(default)]
    pub strategy: StrategyParams,
}

fn default_initial_capital() -> f64 {
    1_000.0
}

impl RunConfig {
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = toml::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.strategy.validate()?;
        if self.initial_capital <= 0.0 {
            return Err(ConfigError::NonPositiveCapital(self.initial_capital));
        }
        if let (Some(start), Some(end)) = (self.start, self.end) {
            if start > end {
                return Err(ConfigError::DateRange { start, end });
            }
        }
        Ok(())
    }

    /// Deterministic content hash of this configuration.
    ///
    /// Two runs with identical configs share a run id, which makes result
    /// directories and comparisons stable across invocations.
    pub fn run_id(&self) -> String {
        let json = serde_json::to_string(self).expect("RunConfig serialization failed");
        blake3::hash(json.as_bytes()).to_hex().to_string()
    }
}
