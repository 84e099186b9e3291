//! Strategy parameters and the per-bar driver.

pub mod driver;
pub mod params;

pub use driver::{StrategyDriver, StrategyError};
pub use params::{ParamsError, StrategyParams};
