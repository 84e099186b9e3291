//! Indicator pipeline — fans one bar into every indicator and assembles a
//! snapshot once all of them are warm.
//!
//! The pipeline returns `None` until the slowest indicator (the slow SMA,
//! 50 bars at default settings) has enough history. The driver skips scoring
//! and lifecycle transitions on those bars.

use super::{Bollinger, Macd, Rsi, Sma};
use crate::domain::Bar;
use crate::strategy::StrategyParams;

/// Per-bar, read-only indicator values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndicatorSnapshot {
    pub rsi: f64,
    pub macd: f64,
    pub macd_signal: f64,
    pub sma_fast: f64,
    pub sma_slow: f64,
    pub boll_lower: f64,
    pub boll_mid: f64,
    pub boll_upper: f64,
}

#[derive(Debug, Clone)]
pub struct IndicatorPipeline {
    rsi: Rsi,
    macd: Macd,
    sma_fast: Sma,
    sma_slow: Sma,
    bollinger: Bollinger,
}

impl IndicatorPipeline {
    pub fn new(params: &StrategyParams) -> Self {
        Self {
            rsi: Rsi::new(params.rsi_period),
            macd: Macd::new(params.macd_fast, params.macd_slow, params.macd_signal),
            sma_fast: Sma::new(params.sma_fast),
            sma_slow: Sma::new(params.sma_slow),
            bollinger: Bollinger::new(params.boll_period, params.boll_multiplier),
        }
    }

    /// Bars required before `update` produces its first snapshot.
    pub fn warmup_bars(&self) -> usize {
        self.rsi
            .lookback()
            .max(self.macd.lookback())
            .max(self.sma_fast.lookback())
            .max(self.sma_slow.lookback())
            .max(self.bollinger.lookback())
    }

    /// Feed one bar. Every indicator consumes the close even during warmup,
    /// so history accumulates causally from the first bar.
    pub fn update(&mut self, bar: &Bar) -> Option<IndicatorSnapshot> {
        let close = bar.close;
        let rsi = self.rsi.update(close);
        let macd = self.macd.update(close);
        let sma_fast = self.sma_fast.update(close);
        let sma_slow = self.sma_slow.update(close);
        let bands = self.bollinger.update(close);

        match (rsi, macd, sma_fast, sma_slow, bands) {
            (Some(rsi), Some(macd), Some(sma_fast), Some(sma_slow), Some(bands)) => {
                Some(IndicatorSnapshot {
                    rsi,
                    macd: macd.macd,
                    macd_signal: macd.signal,
                    sma_fast,
                    sma_slow,
                    boll_lower: bands.lower,
                    boll_mid: bands.middle,
                    boll_upper: bands.upper,
                })
            }
            _ => None,
        }
    }
}
