//! Streaming indicator implementations.
//!
//! Each indicator consumes one close per bar via `update` and returns `None`
//! until its lookback is satisfied — insufficient history is flagged, never
//! silently defaulted. All computations are causal: a value at bar t depends
//! only on closes up to and including bar t.

pub mod bollinger;
pub mod ema;
pub mod macd;
pub mod pipeline;
pub mod rsi;
pub mod sma;

pub use bollinger::{Bollinger, BollingerBands};
pub use ema::Ema;
pub use macd::{Macd, MacdPoint};
pub use pipeline::{IndicatorPipeline, IndicatorSnapshot};
pub use rsi::Rsi;
pub use sma::Sma;

/// Assert two f64 values are approximately equal (within epsilon).
#[cfg(test)]
pub fn assert_approx(actual: f64, expected: f64, epsilon: f64) {
    assert!(
        (actual - expected).abs() < epsilon,
        "assert_approx failed: actual={actual}, expected={expected}, diff={}, epsilon={epsilon}",
        (actual - expected).abs()
    );
}

/// Default epsilon for indicator tests.
#[cfg(test)]
pub const DEFAULT_EPSILON: f64 = 1e-10;

/// Feed a series of closes through a stateful update function, collecting
/// the outputs. Test helper shared across indicator modules.
#[cfg(test)]
pub fn stream<T, F>(closes: &[f64], mut update: F) -> Vec<Option<T>>
where
    F: FnMut(f64) -> Option<T>,
{
    closes.iter().map(|&c| update(c)).collect()
}
