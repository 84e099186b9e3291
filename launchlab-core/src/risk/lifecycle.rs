//! Position lifecycle state machine.
//!
//! Evaluated once per bar. When a position is open, the exit rules run as an
//! explicit ordered list — stop-loss, trailing stop, take-profit, time stop —
//! and the first match wins, so exactly one exit fires per bar. An entry is
//! only considered when the incoming state for the bar is flat; an entry and
//! an exit can never both occur on the same bar.

use crate::domain::{ExitReason, OrderIntent, SkipReason, SkippedEntry, TradeRecord};
use crate::risk::{Position, PositionStatus, WeeklyTradeCounter};
use crate::signal::SignalScore;
use crate::strategy::StrategyParams;
use chrono::NaiveDate;

pub struct LifecycleManager {
    params: StrategyParams,
    position: Position,
    weekly: WeeklyTradeCounter,
    entry_score: Option<SignalScore>,
    trade_log: Vec<TradeRecord>,
    skipped_entries: Vec<SkippedEntry>,
}

impl LifecycleManager {
    pub fn new(params: StrategyParams) -> Self {
        let weekly = WeeklyTradeCounter::new(params.weekly_trade_cap);
        Self {
            params,
            position: Position::flat(),
            weekly,
            entry_score: None,
            trade_log: Vec::new(),
            skipped_entries: Vec::new(),
        }
    }

    pub fn position(&self) -> &Position {
        &self.position
    }

    pub fn trade_log(&self) -> &[TradeRecord] {
        &self.trade_log
    }

    pub fn skipped_entries(&self) -> &[SkippedEntry] {
        &self.skipped_entries
    }

    /// Entries recorded in the current ISO week.
    pub fn entries_this_week(&self) -> u32 {
        self.weekly.count()
    }

    /// Evaluate one bar. Returns the single order intent for this bar, if any.
    pub fn on_bar(
        &mut self,
        date: NaiveDate,
        close: f64,
        score: &SignalScore,
    ) -> Option<OrderIntent> {
        self.weekly.roll_over(date);
        let qualifies = score.total() >= self.params.entry_threshold;

        match self.position.status {
            PositionStatus::Open => {
                // A qualifying signal cannot open a second position.
                if qualifies {
                    self.skipped_entries.push(SkippedEntry {
                        date,
                        reason: SkipReason::PositionOpen,
                        score_total: score.total(),
                    });
                }

                if let Some(reason) = self.first_exit(close) {
                    return Some(self.exit(date, close, reason));
                }

                self.hold(close);
                None
            }
            PositionStatus::Flat => {
                if !qualifies {
                    return None;
                }
                if self.weekly.at_cap() {
                    self.skipped_entries.push(SkippedEntry {
                        date,
                        reason: SkipReason::WeeklyCapReached,
                        score_total: score.total(),
                    });
                    return None;
                }
                Some(self.enter(date, close, score))
            }
        }
    }

    /// Host-requested liquidation, used on the final bar of a run.
    pub fn close_out(&mut self, date: NaiveDate, close: f64) -> Option<OrderIntent> {
        self.position
            .is_open()
            .then(|| self.exit(date, close, ExitReason::EndOfRun))
    }

    /// First matching exit rule, in priority order.
    fn first_exit(&self, close: f64) -> Option<ExitReason> {
        let p = &self.position;
        let rules = [
            (
                close <= p.entry_price * (1.0 - self.params.stop_loss_pct),
                ExitReason::StopLoss,
            ),
            (
                p.trailing_stop_price.is_some_and(|stop| close <= stop),
                ExitReason::TrailingStop,
            ),
            (
                close >= p.entry_price * (1.0 + self.params.take_profit_pct),
                ExitReason::TakeProfit,
            ),
            (
                p.days_held >= self.params.time_stop_bars,
                ExitReason::TimeStop,
            ),
        ];
        rules
            .into_iter()
            .find_map(|(hit, reason)| hit.then_some(reason))
    }

    /// No exit fired: ratchet the high watermark, manage the trailing stop,
    /// and count the held bar.
    fn hold(&mut self, close: f64) {
        let p = &mut self.position;
        p.highest_price_since_entry = p.highest_price_since_entry.max(close);

        let armed = p.highest_price_since_entry
            >= p.entry_price * (1.0 + self.params.trail_arm_pct);
        if armed {
            let floor = p.highest_price_since_entry * (1.0 - self.params.trail_pct);
            // The floor only ever rises.
            p.trailing_stop_price = Some(match p.trailing_stop_price {
                Some(current) => current.max(floor),
                None => floor,
            });
        }

        p.days_held += 1;
    }

    fn enter(&mut self, date: NaiveDate, close: f64, score: &SignalScore) -> OrderIntent {
        self.position = Position::open(date, close, 1.0);
        self.entry_score = Some(*score);
        self.weekly.record_entry();
        OrderIntent::buy(self.position.quantity)
    }

    fn exit(&mut self, date: NaiveDate, close: f64, reason: ExitReason) -> OrderIntent {
        let p = &self.position;
        let entry_date = p.entry_date.expect("open position has an entry date");
        self.trade_log.push(TradeRecord {
            entry_date,
            exit_date: date,
            exit_reason: reason,
            entry_price: p.entry_price,
            exit_price: close,
            pnl_pct: (close - p.entry_price) / p.entry_price,
            days_held: p.days_held,
            score_at_entry: self.entry_score.take().unwrap_or_default(),
        });
        let quantity = p.quantity;
        self.position = Position::flat();
        OrderIntent::sell(quantity)
    }
}
