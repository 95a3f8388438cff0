//! Market analytics: macro conditions, monthly sampling, history, and queries.

pub mod analytics;
pub mod config;
pub mod engine;
pub mod history;
pub mod types;

pub use analytics::*;
pub use config::MarketConfig;
pub use engine::*;
pub use history::*;
pub use types::*;
