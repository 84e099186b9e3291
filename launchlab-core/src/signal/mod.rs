//! Composite signal scoring.

pub mod score;

pub use score::{score, SignalScore};
