//! Bollinger Bands — moving average +/- standard deviation multiplier.
//!
//! - Middle: SMA(close, period)
//! - Upper: middle + mult * stddev(close, period)
//! - Lower: middle - mult * stddev(close, period)
//!
//! Uses population stddev (divide by N). First valid output after `period`
//! closes.

use std::collections::VecDeque;

/// One bar's band values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BollingerBands {
    pub lower: f64,
    pub middle: f64,
    pub upper: f64,
}

#[derive(Debug, Clone)]
pub struct Bollinger {
    period: usize,
    multiplier: f64,
    window: VecDeque<f64>,
}

impl Bollinger {
    pub fn new(period: usize, multiplier: f64) -> Self {
        assert!(period >= 1, "Bollinger period must be >= 1");
        assert!(multiplier > 0.0, "Bollinger multiplier must be positive");
        Self {
            period,
            multiplier,
            window: VecDeque::with_capacity(period + 1),
        }
    }

    /// Bars required before the first valid output.
    pub fn lookback(&self) -> usize {
        self.period
    }

    pub fn update(&mut self, close: f64) -> Option<BollingerBands> {
        self.window.push_back(close);
        if self.window.len() > self.period {
            self.window.pop_front();
        }
        if self.window.len() < self.period {
            return None;
        }

        let n = self.period as f64;
        let mean = self.window.iter().sum::<f64>() / n;
        let variance = self
            .window
            .iter()
            .map(|&c| {
                let diff = c - mean;
                diff * diff
            })
            .sum::<f64>()
            / n;
        let stddev = variance.sqrt();

        Some(BollingerBands {
            lower: mean - self.multiplier * stddev,
            middle: mean,
            upper: mean + self.multiplier * stddev,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, stream, DEFAULT_EPSILON};

    #[test]
    fn bollinger_middle_is_sma() {
        let mut bb = Bollinger::new(3, 2.0);
        let out = stream(&[10.0, 11.0, 12.0, 13.0, 14.0], |c| bb.update(c));

        assert!(out[0].is_none());
        assert!(out[1].is_none());
        assert_approx(out[2].unwrap().middle, 11.0, DEFAULT_EPSILON);
        assert_approx(out[3].unwrap().middle, 12.0, DEFAULT_EPSILON);
    }

    #[test]
    fn bollinger_bands_symmetric() {
        let mut bb = Bollinger::new(3, 2.0);
        let out = stream(&[10.0, 11.0, 12.0, 13.0, 14.0], |c| bb.update(c));

        for bands in out.into_iter().flatten() {
            let half_width = bands.upper - bands.middle;
            assert_approx(bands.middle - bands.lower, half_width, DEFAULT_EPSILON);
        }
    }

    #[test]
    fn bollinger_known_width() {
        // Window (10, 12, 14): mean 12, population variance (4+0+4)/3,
        // stddev = sqrt(8/3).
        let mut bb = Bollinger::new(3, 2.0);
        let out = stream(&[10.0, 12.0, 14.0], |c| bb.update(c));
        let bands = out[2].unwrap();
        let stddev = (8.0f64 / 3.0).sqrt();
        assert_approx(bands.upper, 12.0 + 2.0 * stddev, 1e-9);
        assert_approx(bands.lower, 12.0 - 2.0 * stddev, 1e-9);
    }

    #[test]
    fn bollinger_constant_price_zero_width() {
        let mut bb = Bollinger::new(3, 2.0);
        let out = stream(&[100.0, 100.0, 100.0, 100.0], |c| bb.update(c));
        let bands = out[3].unwrap();
        assert_approx(bands.upper, 100.0, DEFAULT_EPSILON);
        assert_approx(bands.lower, 100.0, DEFAULT_EPSILON);
    }

    #[test]
    fn bollinger_lookback() {
        assert_eq!(Bollinger::new(20, 2.0).lookback(), 20);
    }
}
