//! Month-by-month market simulation.
//!
//! The engine owns its macro conditions, its history and an injected random
//! source. Each [`MarketEngine::advance`] call may drift the macro conditions,
//! derives the month's multipliers, samples a population of synthetic
//! properties per category and stores one aggregate snapshot per category.

use super::config::MarketConfig;
use super::history::validate_history;
use super::types::{EconomicFactors, History, MacroConditions, MarketSnapshot};
use crate::core::constants::{
    DISTRESS_PRICE_RANGE, DISTRESS_RENT_RANGE, FLUCTUATION_RANGE, INTEREST_RATE_DRIFT,
    INTEREST_RATE_IMPACT_DIVISOR, INTEREST_RATE_MAX, INTEREST_RATE_MIN, MONTHS_PER_YEAR,
    NEUTRAL_INTEREST_RATE, NEUTRAL_UNEMPLOYMENT, SEASONAL_FACTORS, UNEMPLOYMENT_DRIFT,
    UNEMPLOYMENT_IMPACT_DIVISOR, UNEMPLOYMENT_MAX, UNEMPLOYMENT_MIN,
};
use crate::core::error::Result;
use crate::property::{
    generate_terms, Property, PropertyCategory, PropertyTerms, MARKET_SAMPLE_ADDRESS,
};
use log::{debug, info};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Seasonal multiplier for any month number; wraps every twelve months.
pub fn seasonal_factor(month: u32) -> f64 {
    let index = (month as i64 - 1).rem_euclid(MONTHS_PER_YEAR as i64) as usize;
    SEASONAL_FACTORS[index]
}

/// Derives the month's multipliers from macro conditions and a fluctuation draw.
///
/// - price = seasonal × rate impact × trend × fluctuation
/// - rent = seasonal × employment impact × fluctuation
/// - inventory = 1 / (seasonal × trend)
pub fn derive_factors(
    conditions: &MacroConditions,
    month: u32,
    fluctuation: f64,
) -> EconomicFactors {
    let seasonal = seasonal_factor(month);
    let rate_impact = 1.0
        - (conditions.interest_rate - NEUTRAL_INTEREST_RATE) / INTEREST_RATE_IMPACT_DIVISOR;
    let employment_impact = 1.0
        - (conditions.unemployment - NEUTRAL_UNEMPLOYMENT) / UNEMPLOYMENT_IMPACT_DIVISOR;
    let trend = conditions.trend.factor();

    EconomicFactors {
        price: seasonal * rate_impact * trend * fluctuation,
        rent: seasonal * employment_impact * fluctuation,
        inventory: 1.0 / (seasonal * trend),
    }
}

/// Running sums for one category's sample population.
#[derive(Debug, Default)]
struct SampleTotals {
    count: u32,
    price: f64,
    rent: f64,
    cap_rate: f64,
    available: u32,
    days_on_market: f64,
}

impl SampleTotals {
    fn add(&mut self, property: &Property, available: bool, days_on_market: u32) {
        self.count += 1;
        self.price += property.price_per_unit;
        self.rent += property.rent_per_unit;
        self.cap_rate += property.cap_rate();
        if available {
            self.available += 1;
        }
        self.days_on_market += days_on_market as f64;
    }

    fn into_snapshot(self, category: PropertyCategory) -> MarketSnapshot {
        let n = self.count.max(1) as f64;
        MarketSnapshot {
            category,
            avg_price_per_unit: self.price / n,
            avg_rent_per_unit: self.rent / n,
            avg_cap_rate: self.cap_rate / n,
            inventory: self.available,
            days_on_market: self.days_on_market / n,
        }
    }
}

/// The market simulator. One instance is driven by one caller, one month at a time.
#[derive(Debug, Clone)]
pub struct MarketEngine<R = ChaCha8Rng> {
    conditions: MacroConditions,
    history: History,
    config: MarketConfig,
    rng: R,
}

impl MarketEngine<ChaCha8Rng> {
    /// Reproducible engine with default tuning.
    pub fn from_seed(seed: u64) -> Self {
        Self::new(ChaCha8Rng::seed_from_u64(seed))
    }

    /// Nondeterministic engine with default tuning.
    pub fn from_entropy() -> Self {
        Self::new(ChaCha8Rng::from_entropy())
    }
}

impl<R> MarketEngine<R> {
    pub fn conditions(&self) -> &MacroConditions {
        &self.conditions
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn config(&self) -> &MarketConfig {
        &self.config
    }
}

impl<R: Rng> MarketEngine<R> {
    pub fn new(rng: R) -> Self {
        Self::with_config(MarketConfig::default(), rng)
    }

    /// Engine with randomized starting conditions.
    pub fn with_config(config: MarketConfig, mut rng: R) -> Self {
        let conditions = MacroConditions::random(&mut rng);
        Self::with_conditions(conditions, config, rng)
    }

    /// Engine with the given starting conditions.
    ///
    /// `config` must satisfy [`MarketConfig::is_valid`]; sampling panics otherwise.
    pub fn with_conditions(conditions: MacroConditions, config: MarketConfig, rng: R) -> Self {
        debug_assert!(config.is_valid(), "invalid market config: {config:?}");
        Self {
            conditions,
            history: History::new(),
            config,
            rng,
        }
    }

    /// The engine's random source, for collaborators that generate listings.
    pub fn rng_mut(&mut self) -> &mut R {
        &mut self.rng
    }

    /// Replaces macro conditions wholesale (used when restoring a save).
    pub fn set_conditions(&mut self, conditions: MacroConditions) {
        self.conditions = conditions;
    }

    /// Re-randomizes macro conditions as if the engine were freshly created.
    pub fn regenerate_conditions(&mut self) {
        self.conditions = MacroConditions::random(&mut self.rng);
        debug!(
            "macro conditions regenerated: trend={} rate={:.2} unemployment={:.2}",
            self.conditions.trend.name(),
            self.conditions.interest_rate,
            self.conditions.unemployment
        );
    }

    /// Replaces the whole history after validating it.
    ///
    /// On error the existing history is left untouched.
    pub fn load_history(&mut self, history: History) -> Result<()> {
        validate_history(&history)?;
        self.history = history;
        Ok(())
    }

    /// Draws this call's fluctuation and derives the month's multipliers.
    pub fn economic_factors(&mut self, month: u32) -> EconomicFactors {
        let (lo, hi) = FLUCTUATION_RANGE;
        let fluctuation = self.rng.gen_range(lo..=hi);
        derive_factors(&self.conditions, month, fluctuation)
    }

    /// Generates and stores one snapshot per category for `month`.
    ///
    /// Re-running a month overwrites its entry with a freshly randomized result.
    pub fn advance(&mut self, month: u32) -> Vec<MarketSnapshot> {
        if self.rng.gen_bool(self.config.mutation_chance) {
            self.mutate_conditions();
        }

        let factors = self.economic_factors(month);

        let snapshots: Vec<MarketSnapshot> = PropertyCategory::ALL
            .iter()
            .map(|&category| self.sample_category(category, &factors))
            .collect();

        info!(
            "month {} generated: trend={} rate={:.2}% unemployment={:.2}% price factor={:.4}",
            month,
            self.conditions.trend.name(),
            self.conditions.interest_rate,
            self.conditions.unemployment,
            factors.price
        );

        self.history.insert(month, snapshots.clone());
        snapshots
    }

    /// Same as [`advance`](Self::advance).
    pub fn generate_monthly_samples(&mut self, month: u32) -> Vec<MarketSnapshot> {
        self.advance(month)
    }

    /// Drifts rate and unemployment, and occasionally switches the trend.
    fn mutate_conditions(&mut self) {
        let rate_drift = self.rng.gen_range(-INTEREST_RATE_DRIFT..=INTEREST_RATE_DRIFT);
        self.conditions.interest_rate =
            (self.conditions.interest_rate + rate_drift).clamp(INTEREST_RATE_MIN, INTEREST_RATE_MAX);

        let unemployment_drift = self.rng.gen_range(-UNEMPLOYMENT_DRIFT..=UNEMPLOYMENT_DRIFT);
        self.conditions.unemployment = (self.conditions.unemployment + unemployment_drift)
            .clamp(UNEMPLOYMENT_MIN, UNEMPLOYMENT_MAX);

        if self.rng.gen_bool(self.config.trend_switch_chance) {
            let options = self.conditions.trend.others();
            let next = options[self.rng.gen_range(0..options.len())];
            debug!(
                "market trend {} -> {}",
                self.conditions.trend.name(),
                next.name()
            );
            self.conditions.trend = next;
        }

        debug!(
            "macro conditions drifted: rate={:.2} unemployment={:.2}",
            self.conditions.interest_rate, self.conditions.unemployment
        );
    }

    fn sample_category(
        &mut self,
        category: PropertyCategory,
        factors: &EconomicFactors,
    ) -> MarketSnapshot {
        let (min_size, max_size) = self.config.sample_size;
        let sample_size = self.rng.gen_range(min_size..=max_size);

        let mut totals = SampleTotals::default();
        for _ in 0..sample_size {
            let property = self.sample_property(category, factors);
            let available = self.rng.gen_bool(self.config.availability_chance);
            let days_on_market = self.rng.gen_range(0..=self.config.max_days_on_market);
            totals.add(&property, available, days_on_market);
        }

        totals.into_snapshot(category)
    }

    /// A disposable property shaped by this month's economics.
    fn sample_property(&mut self, category: PropertyCategory, factors: &EconomicFactors) -> Property {
        let (price_lo, price_hi) = self.config.price_jitter;
        let (rent_lo, rent_hi) = self.config.rent_jitter;
        let price_mult = factors.price * self.rng.gen_range(price_lo..=price_hi);
        let rent_mult = factors.rent * self.rng.gen_range(rent_lo..=rent_hi);

        let base = generate_terms(category, &mut self.rng);
        let terms = PropertyTerms {
            price_per_unit: (base.price_per_unit * price_mult).trunc(),
            rent_per_unit: (base.rent_per_unit * rent_mult).trunc(),
            ..base
        };
        let mut property = Property::new(
            category,
            MARKET_SAMPLE_ADDRESS.to_string(),
            terms,
            &mut self.rng,
        );

        if self.rng.gen_bool(self.config.distress_chance) {
            let (dp_lo, dp_hi) = DISTRESS_PRICE_RANGE;
            let (dr_lo, dr_hi) = DISTRESS_RENT_RANGE;
            property.price_per_unit *= self.rng.gen_range(dp_lo..=dp_hi);
            property.rent_per_unit *= self.rng.gen_range(dr_lo..=dr_hi);
        }

        property
    }
}
