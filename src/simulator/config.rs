//! Simulation configuration.

use crate::market::MarketConfig;

/// Configuration for a headless market simulation.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Months to advance per run
    pub months: u32,

    /// Random seed for reproducibility (None = random)
    pub seed: Option<u64>,

    /// Number of independent runs; run i uses seed + i (wrapping)
    pub runs: u32,

    /// Log verbosity (0 = silent, 1 = summary, 2 = per month)
    pub verbosity: u8,

    /// Market tuning shared by every run
    pub market: MarketConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            months: 24,
            seed: Some(42),
            runs: 1,
            verbosity: 1,
            market: MarketConfig::default(),
        }
    }
}

impl SimConfig {
    /// Many long runs for distribution analysis.
    pub fn monte_carlo(runs: u32) -> Self {
        Self {
            months: 120,
            runs,
            verbosity: 0,
            ..Default::default()
        }
    }
}
