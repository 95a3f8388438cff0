//! Rental properties: types, valuation, and generation.

pub mod generation;
pub mod types;

pub use generation::*;
pub use types::*;
