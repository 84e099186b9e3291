//! Composite signal score — seven independent bullish predicates, 0–7 total.
//!
//! Scoring is a pure function of the current and previous indicator
//! snapshots, the event-catalog view, and the close. It never sees position
//! or portfolio state, carries no randomness, and is recomputed fresh every
//! bar.

use crate::events::EventView;
use crate::indicators::IndicatorSnapshot;
use crate::strategy::StrategyParams;
use serde::{Deserialize, Serialize};

/// One boolean per named predicate, as a fixed tagged record. The fixed shape
/// removes any ambiguity about ordering or missing components.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignalScore {
    /// RSI rising and inside the recovery band.
    pub rsi_recovery: bool,
    /// MACD line crossed above its signal line on this bar.
    pub macd_cross: bool,
    /// Fast SMA above slow SMA. Level-based: holds every bar the condition
    /// persists, not only the crossing bar.
    pub golden_cross: bool,
    /// Close above the fast SMA.
    pub above_sma_fast: bool,
    /// Close near (or below) the lower Bollinger band.
    pub near_lower_band: bool,
    /// A launch is scheduled within the hype window.
    pub launch_upcoming: bool,
    /// A successful launch happened within the momentum window.
    pub post_launch_momentum: bool,
}

impl SignalScore {
    /// Sum of the seven components. Always within 0..=7.
    pub fn total(&self) -> u8 {
        self.components().iter().filter(|(_, hit)| *hit).count() as u8
    }

    /// Named component states, in scoring order. Used for reporting.
    pub fn components(&self) -> [(&'static str, bool); 7] {
        [
            ("rsi_recovery", self.rsi_recovery),
            ("macd_cross", self.macd_cross),
            ("golden_cross", self.golden_cross),
            ("above_sma_fast", self.above_sma_fast),
            ("near_lower_band", self.near_lower_band),
            ("launch_upcoming", self.launch_upcoming),
            ("post_launch_momentum", self.post_launch_momentum),
        ]
    }
}

/// Evaluate all seven predicates for one bar.
///
/// `prev` is the previous bar's snapshot; on the first valid bar callers pass
/// the current snapshot for both, which keeps the edge-triggered components
/// (RSI recovery, MACD cross) false until a real previous bar exists.
pub fn score(
    prev: &IndicatorSnapshot,
    curr: &IndicatorSnapshot,
    events: &EventView,
    close: f64,
    params: &StrategyParams,
) -> SignalScore {
    SignalScore {
        rsi_recovery: prev.rsi < curr.rsi
            && curr.rsi >= params.rsi_band_low
            && curr.rsi <= params.rsi_band_high,
        macd_cross: curr.macd > curr.macd_signal && prev.macd <= prev.macd_signal,
        golden_cross: curr.sma_fast > curr.sma_slow,
        above_sma_fast: close > curr.sma_fast,
        near_lower_band: close < curr.boll_lower * (1.0 + params.boll_proximity_pct),
        launch_upcoming: events.upcoming_launch_in_days.is_some(),
        post_launch_momentum: events.days_since_successful_launch.is_some(),
    }
}
