//! Player portfolio: capital, owned properties, listings, and the calendar.

pub mod logic;
pub mod types;

pub use types::*;
