use crate::core::constants::{
    COLD_MIN_DAYS_ON_MARKET, COLD_MIN_INVENTORY, HOT_MAX_DAYS_ON_MARKET, HOT_MAX_INVENTORY,
    INTEREST_RATE_INITIAL_MAX, INTEREST_RATE_MAX, INTEREST_RATE_MIN, UNEMPLOYMENT_INITIAL_MAX,
    UNEMPLOYMENT_MAX, UNEMPLOYMENT_MIN,
};
use crate::property::PropertyCategory;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Month number -> one snapshot per category, in category order.
pub type History = BTreeMap<u32, Vec<MarketSnapshot>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Bull,
    Bear,
    Stable,
}

impl Trend {
    pub const ALL: [Trend; 3] = [Trend::Bull, Trend::Bear, Trend::Stable];

    pub fn random(rng: &mut impl Rng) -> Self {
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }

    /// Price momentum factor applied by this trend.
    pub fn factor(&self) -> f64 {
        match self {
            Trend::Bull => 1.02,
            Trend::Bear => 0.98,
            Trend::Stable => 1.0,
        }
    }

    /// The two trends this one can transition to.
    pub fn others(&self) -> [Trend; 2] {
        match self {
            Trend::Bull => [Trend::Bear, Trend::Stable],
            Trend::Bear => [Trend::Bull, Trend::Stable],
            Trend::Stable => [Trend::Bull, Trend::Bear],
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Trend::Bull => "bull",
            Trend::Bear => "bear",
            Trend::Stable => "stable",
        }
    }
}

/// Economy-wide state owned by one engine instance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MacroConditions {
    pub trend: Trend,
    /// Percentage, kept in [2.5, 10.0].
    pub interest_rate: f64,
    /// Percentage, kept in [3.0, 15.0].
    pub unemployment: f64,
}

impl MacroConditions {
    /// Fresh conditions: uniform trend, rate in [2.5, 7.5], unemployment in [3.0, 10.0].
    pub fn random(rng: &mut impl Rng) -> Self {
        Self {
            trend: Trend::random(rng),
            interest_rate: rng.gen_range(INTEREST_RATE_MIN..=INTEREST_RATE_INITIAL_MAX),
            unemployment: rng.gen_range(UNEMPLOYMENT_MIN..=UNEMPLOYMENT_INITIAL_MAX),
        }
    }

    /// Builds conditions with rate and unemployment clamped to their legal ranges.
    pub fn new(trend: Trend, interest_rate: f64, unemployment: f64) -> Self {
        Self {
            trend,
            interest_rate: interest_rate.clamp(INTEREST_RATE_MIN, INTEREST_RATE_MAX),
            unemployment: unemployment.clamp(UNEMPLOYMENT_MIN, UNEMPLOYMENT_MAX),
        }
    }
}

/// Per-month multipliers derived from macro conditions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EconomicFactors {
    pub price: f64,
    pub rent: f64,
    /// Computed for completeness; nothing downstream consumes it yet.
    pub inventory: f64,
}

/// Aggregate statistics for one category in one simulated month.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarketSnapshot {
    #[serde(rename = "property_type")]
    pub category: PropertyCategory,
    pub avg_price_per_unit: f64,
    pub avg_rent_per_unit: f64,
    pub avg_cap_rate: f64,
    /// Number of available properties in the sample.
    pub inventory: u32,
    #[serde(default)]
    pub days_on_market: f64,
}

impl MarketSnapshot {
    pub fn temperature(&self) -> MarketTemperature {
        MarketTemperature::classify(self.days_on_market, self.inventory)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarketTemperature {
    Hot,
    Cold,
    Balanced,
}

impl MarketTemperature {
    /// Hot: fast sales and thin inventory. Cold: slow sales and deep inventory.
    pub fn classify(days_on_market: f64, inventory: u32) -> Self {
        if days_on_market < HOT_MAX_DAYS_ON_MARKET && inventory < HOT_MAX_INVENTORY {
            MarketTemperature::Hot
        } else if days_on_market > COLD_MIN_DAYS_ON_MARKET && inventory > COLD_MIN_INVENTORY {
            MarketTemperature::Cold
        } else {
            MarketTemperature::Balanced
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MarketTemperature::Hot => "Hot Market",
            MarketTemperature::Cold => "Cold Market",
            MarketTemperature::Balanced => "Balanced Market",
        }
    }
}

impl fmt::Display for MarketTemperature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A stored snapshot paired with its read-time temperature.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarketReading {
    pub snapshot: MarketSnapshot,
    pub temperature: MarketTemperature,
}

impl From<MarketSnapshot> for MarketReading {
    fn from(snapshot: MarketSnapshot) -> Self {
        Self {
            temperature: snapshot.temperature(),
            snapshot,
        }
    }
}
