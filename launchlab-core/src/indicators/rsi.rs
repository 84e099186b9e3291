//! Relative Strength Index (RSI).
//!
//! Uses Wilder smoothing of average gains and average losses.
//! RSI = 100 - 100 / (1 + avg_gain / avg_loss)
//! Seed: simple averages over the first `period` changes, so `period + 1`
//! closes are needed for the first valid output.
//! Edge cases: avg_loss == 0 → RSI = 100; avg_gain == 0 → RSI = 0;
//! both zero (flat seed window) → RSI = 50.

#[derive(Debug, Clone)]
pub struct Rsi {
    period: usize,
    prev_close: Option<f64>,
    seed_gain: f64,
    seed_loss: f64,
    seed_count: usize,
    averages: Option<(f64, f64)>,
}

impl Rsi {
    pub fn new(period: usize) -> Self {
        assert!(period >= 1, "RSI period must be >= 1");
        Self {
            period,
            prev_close: None,
            seed_gain: 0.0,
            seed_loss: 0.0,
            seed_count: 0,
            averages: None,
        }
    }

    /// Bars required before the first valid output.
    pub fn lookback(&self) -> usize {
        self.period + 1
    }

    pub fn update(&mut self, close: f64) -> Option<f64> {
        let Some(prev) = self.prev_close.replace(close) else {
            return None;
        };
        let change = close - prev;
        let gain = change.max(0.0);
        let loss = (-change).max(0.0);

        let alpha = 1.0 / self.period as f64;
        let (avg_gain, avg_loss) = match self.averages {
            Some((ag, al)) => (
                alpha * gain + (1.0 - alpha) * ag,
                alpha * loss + (1.0 - alpha) * al,
            ),
            None => {
                self.seed_gain += gain;
                self.seed_loss += loss;
                self.seed_count += 1;
                if self.seed_count < self.period {
                    return None;
                }
                (
                    self.seed_gain / self.period as f64,
                    self.seed_loss / self.period as f64,
                )
            }
        };
        self.averages = Some((avg_gain, avg_loss));
        Some(rsi_value(avg_gain, avg_loss))
    }
}

fn rsi_value(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss == 0.0 && avg_gain == 0.0 {
        50.0 // no movement
    } else if avg_loss == 0.0 {
        100.0
    } else if avg_gain == 0.0 {
        0.0
    } else {
        100.0 - 100.0 / (1.0 + avg_gain / avg_loss)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, stream};

    #[test]
    fn rsi_all_gains() {
        let mut rsi = Rsi::new(3);
        let out = stream(&[100.0, 101.0, 102.0, 103.0, 104.0, 105.0], |c| rsi.update(c));
        assert_approx(out[3].unwrap(), 100.0, 1e-6);
    }

    #[test]
    fn rsi_all_losses() {
        let mut rsi = Rsi::new(3);
        let out = stream(&[105.0, 104.0, 103.0, 102.0, 101.0, 100.0], |c| rsi.update(c));
        assert_approx(out[3].unwrap(), 0.0, 1e-6);
    }

    #[test]
    fn rsi_flat_series_is_50() {
        let mut rsi = Rsi::new(3);
        let out = stream(&[100.0, 100.0, 100.0, 100.0], |c| rsi.update(c));
        assert_approx(out[3].unwrap(), 50.0, 1e-6);
    }

    #[test]
    fn rsi_mixed_seed() {
        // Closes: 44, 44.34, 44.09, 43.61
        // Changes: +0.34, -0.25, -0.48
        // avg_gain = 0.34/3, avg_loss = 0.73/3
        // RSI = 100 - 100/(1 + 0.34/0.73) ≈ 31.776
        let mut rsi = Rsi::new(3);
        let out = stream(&[44.0, 44.34, 44.09, 43.61], |c| rsi.update(c));

        assert!(out[0].is_none());
        assert!(out[1].is_none());
        assert!(out[2].is_none());
        assert_approx(out[3].unwrap(), 100.0 - 100.0 / (1.0 + 0.34 / 0.73), 1e-9);
    }

    #[test]
    fn rsi_bounds() {
        let mut rsi = Rsi::new(3);
        let closes = [100.0, 105.0, 98.0, 110.0, 95.0, 115.0, 90.0, 120.0];
        for (i, v) in stream(&closes, |c| rsi.update(c)).into_iter().enumerate() {
            if let Some(v) = v {
                assert!((0.0..=100.0).contains(&v), "RSI out of bounds at bar {i}: {v}");
            }
        }
    }

    #[test]
    fn rsi_lookback() {
        assert_eq!(Rsi::new(14).lookback(), 15);
    }
}
