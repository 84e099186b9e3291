//! Strategy parameters.
//!
//! Defaults mirror the production configuration. Values can arrive from a
//! TOML run config, so range checks live in `validate` rather than in
//! constructor assertions.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ParamsError {
    #[error("{name} period must be >= 1")]
    ZeroPeriod { name: &'static str },

    #[error("{name}: fast period {fast} must be shorter than slow period {slow}")]
    PeriodOrder {
        name: &'static str,
        fast: usize,
        slow: usize,
    },

    #[error("{name} must be within (0, 1), got {value}")]
    FractionOutOfRange { name: &'static str, value: f64 },

    #[error("bollinger multiplier must be positive, got {0}")]
    NonPositiveMultiplier(f64),

    #[error("rsi band must satisfy 0 <= low < high <= 100, got [{low}, {high}]")]
    RsiBand { low: f64, high: f64 },

    #[error("entry threshold must be within 1..=7, got {0}")]
    EntryThreshold(u8),

    #[error("time stop must be >= 1 bar")]
    ZeroTimeStop,

    #[error("weekly trade cap must be >= 1")]
    ZeroWeeklyCap,

    #[error("only one concurrent position is supported, got {0}")]
    MaxPositions(u32),
}

/// All tunables of the strategy in one serializable record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StrategyParams {
    // Indicator periods.
    pub rsi_period: usize,
    pub macd_fast: usize,
    pub macd_slow: usize,
    pub macd_signal: usize,
    pub sma_fast: usize,
    pub sma_slow: usize,
    pub boll_period: usize,
    pub boll_multiplier: f64,

    // Scoring.
    pub rsi_band_low: f64,
    pub rsi_band_high: f64,
    /// Fractional margin above the lower Bollinger band that still counts
    /// as "near" it.
    pub boll_proximity_pct: f64,
    /// Minimum composite score required to enter.
    pub entry_threshold: u8,

    // Exits.
    pub stop_loss_pct: f64,
    pub take_profit_pct: f64,
    /// Unrealized gain that arms the trailing stop.
    pub trail_arm_pct: f64,
    /// Trail distance below the high watermark once armed.
    pub trail_pct: f64,
    /// Force exit after this many held bars.
    pub time_stop_bars: u32,

    // Frequency limits.
    pub weekly_trade_cap: u32,
    pub max_open_positions: u32,
}

impl Default for StrategyParams {
    fn default() -> Self {
        Self {
            rsi_period: 14,
            macd_fast: 12,
            macd_slow: 26,
            macd_signal: 9,
            sma_fast: 20,
            sma_slow: 50,
            boll_period: 20,
            boll_multiplier: 2.0,
            rsi_band_low: 30.0,
            rsi_band_high: 45.0,
            boll_proximity_pct: 0.02,
            entry_threshold: 3,
            stop_loss_pct: 0.05,
            take_profit_pct: 0.10,
            trail_arm_pct: 0.05,
            trail_pct: 0.03,
            time_stop_bars: 10,
            weekly_trade_cap: 5,
            max_open_positions: 1,
        }
    }
}

impl StrategyParams {
    pub fn validate(&self) -> Result<(), ParamsError> {
        for (name, period) in [
            ("rsi", self.rsi_period),
            ("macd fast", self.macd_fast),
            ("macd slow", self.macd_slow),
            ("macd signal", self.macd_signal),
            ("fast sma", self.sma_fast),
            ("slow sma", self.sma_slow),
            ("bollinger", self.boll_period),
        ] {
            if period == 0 {
                return Err(ParamsError::ZeroPeriod { name });
            }
        }
        if self.macd_fast >= self.macd_slow {
            return Err(ParamsError::PeriodOrder {
                name: "macd",
                fast: self.macd_fast,
                slow: self.macd_slow,
            });
        }
        if self.sma_fast >= self.sma_slow {
            return Err(ParamsError::PeriodOrder {
                name: "sma",
                fast: self.sma_fast,
                slow: self.sma_slow,
            });
        }
        if self.boll_multiplier <= 0.0 {
            return Err(ParamsError::NonPositiveMultiplier(self.boll_multiplier));
        }
        if !(0.0 <= self.rsi_band_low
            && self.rsi_band_low < self.rsi_band_high
            && self.rsi_band_high <= 100.0)
        {
            return Err(ParamsError::RsiBand {
                low: self.rsi_band_low,
                high: self.rsi_band_high,
            });
        }
        for (name, value) in [
            ("stop loss", self.stop_loss_pct),
            ("take profit", self.take_profit_pct),
            ("trailing arm threshold", self.trail_arm_pct),
            ("trailing stop distance", self.trail_pct),
        ] {
            if !(value > 0.0 && value < 1.0) {
                return Err(ParamsError::FractionOutOfRange { name, value });
            }
        }
        if !(0.0..1.0).contains(&self.boll_proximity_pct) {
            return Err(ParamsError::FractionOutOfRange {
                name: "bollinger proximity",
                value: self.boll_proximity_pct,
            });
        }
        if !(1..=7).contains(&self.entry_threshold) {
            return Err(ParamsError::EntryThreshold(self.entry_threshold));
        }
        if self.time_stop_bars == 0 {
            return Err(ParamsError::ZeroTimeStop);
        }
        if self.weekly_trade_cap == 0 {
            return Err(ParamsError::ZeroWeeklyCap);
        }
        if self.max_open_positions != 1 {
            return Err(ParamsError::MaxPositions(self.max_open_positions));
        }
        Ok(())
    }
}
