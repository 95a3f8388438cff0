//! Estate - Real-Estate Investment Market Library
//!
//! Rental property valuation, a month-by-month market simulation driven by
//! macro conditions, investor portfolios, and save/load of game progress.

pub mod core;
pub mod investor;
pub mod market;
pub mod property;
pub mod save;
pub mod simulator;

pub use crate::core::error::{EstateError, Result};
pub use investor::{Difficulty, Investor};
pub use market::{MarketConfig, MarketEngine, MarketSnapshot};
pub use property::{Property, PropertyCategory};
