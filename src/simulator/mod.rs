//! Headless market simulator for Monte Carlo analysis.
//!
//! Runs the market engine for many months across seeded runs to analyze:
//! - Price and rent levels per category
//! - Cap rate spread and which category leads most often
//! - How often the macro trend flips

mod config;
mod report;
mod runner;

pub use config::SimConfig;
pub use report::{write_history_csv, CategoryStats, RunStats, SimReport};
pub use runner::{run_simulation, simulate_single_run};
