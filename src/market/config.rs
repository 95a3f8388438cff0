//! Market engine tuning.

use crate::core::constants::*;

/// Probabilities and ranges used when the engine advances a month.
#[derive(Debug, Clone, PartialEq)]
pub struct MarketConfig {
    /// Chance per month that macro conditions drift before sampling (0-1)
    pub mutation_chance: f64,

    /// Chance that a drift also switches the trend (0-1)
    pub trend_switch_chance: f64,

    /// Inclusive sample size range per category; min <= max
    pub sample_size: (u32, u32),

    /// Chance a sample counts toward inventory (0-1)
    pub availability_chance: f64,

    /// Chance a sample is distressed (0-1)
    pub distress_chance: f64,

    /// Per-sample price multiplier range on top of the month's price factor; lo <= hi
    pub price_jitter: (f64, f64),

    /// Per-sample rent multiplier range on top of the month's rent factor; lo <= hi
    pub rent_jitter: (f64, f64),

    /// Inclusive upper bound on days on market
    pub max_days_on_market: u32,
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            mutation_chance: MACRO_MUTATION_CHANCE,
            trend_switch_chance: TREND_SWITCH_CHANCE,
            sample_size: (SAMPLE_SIZE_MIN, SAMPLE_SIZE_MAX),
            availability_chance: AVAILABILITY_CHANCE,
            distress_chance: DISTRESS_CHANCE,
            price_jitter: SAMPLE_PRICE_JITTER,
            rent_jitter: SAMPLE_RENT_JITTER,
            max_days_on_market: DAYS_ON_MARKET_MAX,
        }
    }
}

impl MarketConfig {
    /// Default sampling with macro conditions held fixed.
    pub fn frozen() -> Self {
        Self {
            mutation_chance: 0.0,
            ..Default::default()
        }
    }

    /// True when every chance is in 0-1 and every range is ordered.
    pub fn is_valid(&self) -> bool {
        let chance = |p: f64| (0.0..=1.0).contains(&p);
        let ordered = |(lo, hi): (f64, f64)| lo.is_finite() && hi.is_finite() && lo <= hi;

        chance(self.mutation_chance)
            && chance(self.trend_switch_chance)
            && chance(self.availability_chance)
            && chance(self.distress_chance)
            && self.sample_size.0 <= self.sample_size.1
            && ordered(self.price_jitter)
            && ordered(self.rent_jitter)
    }
}
