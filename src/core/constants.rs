// Expense model
pub const BASE_EXPENSE_RATIO: f64 = 0.35;
pub const EXPENSE_RATIO_VARIATION: f64 = 0.05;
pub const MONTHS_PER_YEAR: u32 = 12;

// Listing generation ranges
pub const PRICE_PER_UNIT_MIN: u32 = 150_000;
pub const PRICE_PER_UNIT_MAX: u32 = 250_000;
pub const RENT_PER_UNIT_MIN: u32 = 1_200;
pub const RENT_PER_UNIT_MAX: u32 = 2_200;
pub const MANAGEMENT_FEE_MIN: f64 = 5.0;
pub const MANAGEMENT_FEE_MAX: f64 = 8.0;
pub const MAINTENANCE_PER_UNIT_MIN: u32 = 200;
pub const MAINTENANCE_PER_UNIT_MAX: u32 = 800;
pub const STREET_NUMBER_MAX: u32 = 9999;
pub const LISTINGS_PER_CATEGORY: usize = 5;

// Underperformer pass on real listings
pub const UNDERPERFORMER_CHANCE: f64 = 0.30;
pub const UNDERPERFORMER_RENT_RANGE: (f64, f64) = (0.7, 0.9);
pub const UNDERPERFORMER_PRICE_RANGE: (f64, f64) = (1.1, 1.3);

// Investment rating thresholds (cap rate %)
pub const RATING_PREMIUM_CAP_RATE: f64 = 7.0;
pub const RATING_SOLID_CAP_RATE: f64 = 5.5;
pub const RATING_BELOW_AVERAGE_CAP_RATE: f64 = 4.0;
pub const RATING_MONEY_PIT_CAP_RATE: f64 = 3.0;

// Macro conditions
pub const INTEREST_RATE_MIN: f64 = 2.5;
pub const INTEREST_RATE_MAX: f64 = 10.0;
pub const INTEREST_RATE_INITIAL_MAX: f64 = 7.5;
pub const INTEREST_RATE_DRIFT: f64 = 0.25;
pub const UNEMPLOYMENT_MIN: f64 = 3.0;
pub const UNEMPLOYMENT_MAX: f64 = 15.0;
pub const UNEMPLOYMENT_INITIAL_MAX: f64 = 10.0;
pub const UNEMPLOYMENT_DRIFT: f64 = 0.5;

// Multiplier derivation: 1 - (rate - NEUTRAL) / DIVISOR
pub const NEUTRAL_INTEREST_RATE: f64 = 4.0;
pub const INTEREST_RATE_IMPACT_DIVISOR: f64 = 100.0;
pub const NEUTRAL_UNEMPLOYMENT: f64 = 5.0;
pub const UNEMPLOYMENT_IMPACT_DIVISOR: f64 = 200.0;
pub const FLUCTUATION_RANGE: (f64, f64) = (0.98, 1.02);

/// Seasonal price/rent multiplier indexed by calendar month (Jan = index 0).
pub const SEASONAL_FACTORS: [f64; 12] = [
    0.95, // Jan - slow
    0.97, 1.03, // Spring pickup
    1.05, 1.07, 1.06, // Summer
    1.04, 1.02, 1.01, // Fall
    1.00, 0.98, // Holiday slowdown
    0.96,
];

// Market sampling defaults (see MarketConfig)
pub const MACRO_MUTATION_CHANCE: f64 = 0.10;
pub const TREND_SWITCH_CHANCE: f64 = 0.20;
pub const SAMPLE_SIZE_MIN: u32 = 80;
pub const SAMPLE_SIZE_MAX: u32 = 120;
pub const AVAILABILITY_CHANCE: f64 = 0.30;
pub const DISTRESS_CHANCE: f64 = 0.15;
pub const DISTRESS_PRICE_RANGE: (f64, f64) = (0.7, 0.9);
pub const DISTRESS_RENT_RANGE: (f64, f64) = (0.8, 1.2);
pub const SAMPLE_PRICE_JITTER: (f64, f64) = (0.95, 1.05);
pub const SAMPLE_RENT_JITTER: (f64, f64) = (0.9, 1.1);
pub const DAYS_ON_MARKET_MAX: u32 = 90;

// Market temperature thresholds
pub const HOT_MAX_DAYS_ON_MARKET: f64 = 30.0;
pub const HOT_MAX_INVENTORY: u32 = 10;
pub const COLD_MIN_DAYS_ON_MARKET: f64 = 60.0;
pub const COLD_MIN_INVENTORY: u32 = 25;

// Momentum blend weights for the trend query
pub const MOMENTUM_LATEST_WEIGHT: f64 = 0.7;
pub const MOMENTUM_PREVIOUS_WEIGHT: f64 = 0.3;

// Starting capital by difficulty
pub const EASY_STARTING_CAPITAL: f64 = 5_000_000.0;
pub const MEDIUM_STARTING_CAPITAL: f64 = 2_500_000.0;
pub const HARD_STARTING_CAPITAL: f64 = 1_000_000.0;

// Persistence
pub const SAVE_DIR_NAME: &str = ".estate";
pub const SAVE_FILE_NAME: &str = "save.json";
