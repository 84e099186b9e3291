//! Order intents — the only output the strategy core hands to its host.

use serde::{Deserialize, Serialize};

/// Direction of an order intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderAction {
    Buy,
    Sell,
}

/// A single order intent for the host to execute.
///
/// The core quotes a unit position on entry; sizing beyond that, fills and
/// portfolio accounting are the host's responsibility. At most one intent is
/// emitted per bar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrderIntent {
    pub action: OrderAction,
    pub quantity: f64,
}

impl OrderIntent {
    pub fn buy(quantity: f64) -> Self {
        Self {
            action: OrderAction::Buy,
            quantity,
        }
    }

    pub fn sell(quantity: f64) -> Self {
        Self {
            action: OrderAction::Sell,
            quantity,
        }
    }
}
