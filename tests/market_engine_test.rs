//! Integration test: Market engine advance and analytics
//!
//! Covers monthly generation, seasonal wrap-around, determinism under a fixed
//! seed, fixed-condition price bounds, and the latest/trend/best queries.

use estate::market::{
    export_history_json, import_history_json, seasonal_factor, MacroConditions, MarketConfig,
    MarketEngine, MarketTemperature, Trend,
};
use estate::property::PropertyCategory;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn neutral_engine(seed: u64) -> MarketEngine {
    MarketEngine::with_conditions(
        MacroConditions::new(Trend::Stable, 4.0, 5.0),
        MarketConfig::frozen(),
        ChaCha8Rng::seed_from_u64(seed),
    )
}

// =========================================================================
// advance(): shape of each month
// =========================================================================

#[test]
fn test_advance_returns_one_snapshot_per_category() {
    let mut engine = MarketEngine::from_seed(12345);
    for month in 1..=36 {
        let snapshots = engine.advance(month);
        assert_eq!(snapshots.len(), 5);
        let categories: Vec<_> = snapshots.iter().map(|s| s.category).collect();
        assert_eq!(categories, PropertyCategory::ALL.to_vec());

        for s in &snapshots {
            assert!(s.inventory <= 120, "inventory {} exceeds sample size", s.inventory);
            assert!((0.0..=90.0).contains(&s.days_on_market));
            assert!(s.avg_price_per_unit > 0.0);
            assert!(s.avg_rent_per_unit > 0.0);
            assert!(s.avg_cap_rate > 0.0);
        }
    }
    assert_eq!(engine.history().len(), 36);
}

#[test]
fn test_inventory_near_thirty_percent_of_sample() {
    let mut engine = MarketEngine::from_seed(2024);
    let mut total_inventory = 0u32;
    let months = 60;
    for month in 1..=months {
        total_inventory += engine.advance(month).iter().map(|s| s.inventory).sum::<u32>();
    }
    // ~100 samples per category, 5 categories, 30% available
    let per_category = total_inventory as f64 / (months as f64 * 5.0);
    assert!(
        (25.0..=35.0).contains(&per_category),
        "average inventory per category {per_category}"
    );
}

#[test]
fn test_seasonal_lookup_invariant_under_whole_years() {
    for month in 1..=12 {
        for k in 0..20 {
            assert_eq!(seasonal_factor(month), seasonal_factor(month + 12 * k));
        }
    }
}

// =========================================================================
// Determinism
// =========================================================================

#[test]
fn test_identically_seeded_engines_produce_identical_months() {
    let mut a = MarketEngine::from_seed(99);
    let mut b = MarketEngine::from_seed(99);
    assert_eq!(a.conditions(), b.conditions());
    for month in 1..=12 {
        assert_eq!(a.advance(month), b.advance(month));
    }
    assert_eq!(a.conditions(), b.conditions());
}

#[test]
fn test_different_seeds_diverge() {
    let mut a = MarketEngine::from_seed(1);
    let mut b = MarketEngine::from_seed(2);
    assert_ne!(a.advance(1), b.advance(1));
}

// =========================================================================
// Fixed macro conditions: multipliers compose multiplicatively
// =========================================================================

#[test]
fn test_duplex_price_within_structural_bounds_under_neutral_conditions() {
    let lower = 150_000.0 * 0.95 * 0.95 * 0.98 * 0.95;
    let upper = 250_000.0 * 0.95 * 1.05 * 1.02 * 1.05;

    for seed in 0..20 {
        let mut engine = neutral_engine(seed);
        for month in 1..=2 {
            let snapshots = engine.advance(month);
            let duplex = snapshots
                .iter()
                .find(|s| s.category == PropertyCategory::Duplex)
                .expect("duplex snapshot");
            assert!(
                duplex.avg_price_per_unit >= lower && duplex.avg_price_per_unit <= upper,
                "seed {seed} month {month}: {} outside [{lower}, {upper}]",
                duplex.avg_price_per_unit
            );
        }
        assert_eq!(*engine.conditions(), MacroConditions::new(Trend::Stable, 4.0, 5.0));
    }
}

#[test]
fn test_spring_prices_exceed_january_on_average() {
    // May's seasonal factor (1.07) is well above January's (0.95).
    let mut january = 0.0;
    let mut may = 0.0;
    for seed in 0..10 {
        let mut engine = neutral_engine(seed);
        january += engine.advance(1)[0].avg_price_per_unit;
        may += engine.advance(5)[0].avg_price_per_unit;
    }
    assert!(may > january);
}

#[test]
fn test_high_interest_rates_depress_prices() {
    let mut cheap_money = 0.0;
    let mut dear_money = 0.0;
    for seed in 0..10 {
        let mut low = MarketEngine::with_conditions(
            MacroConditions::new(Trend::Stable, 2.5, 5.0),
            MarketConfig::frozen(),
            ChaCha8Rng::seed_from_u64(seed),
        );
        let mut high = MarketEngine::with_conditions(
            MacroConditions::new(Trend::Stable, 10.0, 5.0),
            MarketConfig::frozen(),
            ChaCha8Rng::seed_from_u64(seed),
        );
        cheap_money += low.advance(10).iter().map(|s| s.avg_price_per_unit).sum::<f64>();
        dear_money += high.advance(10).iter().map(|s| s.avg_price_per_unit).sum::<f64>();
    }
    assert!(dear_money < cheap_money);
}

// =========================================================================
// Queries
// =========================================================================

#[test]
fn test_queries_on_empty_history() {
    let engine = MarketEngine::from_seed(5);
    assert!(engine.latest().is_empty());
    assert_eq!(engine.best_investment(), None);
    for category in PropertyCategory::ALL {
        assert_eq!(engine.trend(category), 0.0);
    }
}

#[test]
fn test_trend_zero_after_single_month() {
    let mut engine = MarketEngine::from_seed(5);
    engine.advance(1);
    for category in PropertyCategory::ALL {
        assert_eq!(engine.trend(category), 0.0);
    }
}

#[test]
fn test_trend_matches_manual_momentum_blend() {
    let mut engine = MarketEngine::from_seed(31);
    let m1 = engine.advance(1);
    let m2 = engine.advance(2);
    let m3 = engine.advance(3);

    for i in 0..5 {
        let latest = (m3[i].avg_price_per_unit - m2[i].avg_price_per_unit)
            / m2[i].avg_price_per_unit
            * 100.0;
        let previous = (m2[i].avg_price_per_unit - m1[i].avg_price_per_unit)
            / m1[i].avg_price_per_unit
            * 100.0;
        let expected = latest * 0.7 + previous * 0.3;
        let actual = engine.trend(m3[i].category);
        assert!((actual - expected).abs() < 1e-9, "{actual} vs {expected}");
    }
}

#[test]
fn test_latest_annotates_temperature_without_storing_it() {
    let mut engine = MarketEngine::from_seed(8);
    engine.advance(1);
    let generated = engine.advance(2);
    let latest = engine.latest();

    assert_eq!(latest.len(), 5);
    for (reading, stored) in latest.iter().zip(&generated) {
        assert_eq!(reading.snapshot, *stored);
        assert_eq!(
            reading.temperature,
            MarketTemperature::classify(stored.days_on_market, stored.inventory)
        );
    }

    let json = export_history_json(engine.history()).unwrap();
    assert!(!json.contains("temperature"));
}

#[test]
fn test_best_investment_is_strict_max_first_wins() {
    for seed in 0..25 {
        let mut engine = MarketEngine::from_seed(seed);
        let snapshots = engine.advance(1);
        let best = engine.best_investment().expect("history is not empty");

        let max = snapshots
            .iter()
            .map(|s| s.avg_cap_rate)
            .fold(f64::NEG_INFINITY, f64::max);
        let first_max = snapshots.iter().find(|s| s.avg_cap_rate == max).unwrap();
        assert_eq!(best, *first_max);
    }
}

#[test]
fn test_history_round_trips_through_json_into_new_engine() {
    let mut engine = MarketEngine::from_seed(77);
    for month in 1..=4 {
        engine.advance(month);
    }
    let json = export_history_json(engine.history()).unwrap();

    let mut restored = MarketEngine::from_seed(1);
    restored
        .load_history(import_history_json(&json).unwrap())
        .unwrap();
    assert_eq!(restored.history(), engine.history());
    for category in PropertyCategory::ALL {
        assert_eq!(restored.trend(category), engine.trend(category));
    }
    assert_eq!(restored.best_investment(), engine.best_investment());
}

#[test]
fn test_load_history_rejects_corrupt_data_and_keeps_existing() {
    let mut engine = MarketEngine::from_seed(3);
    engine.advance(1);
    let before = engine.history().clone();

    let json = r#"{"2": [{"property_type": "Duplex", "avg_price_per_unit": -5.0,
        "avg_rent_per_unit": 1.0, "avg_cap_rate": 1.0, "inventory": 3}]}"#;
    assert!(import_history_json(json).is_err());

    let parsed = serde_json::from_str(json).unwrap();
    assert!(engine.load_history(parsed).is_err());
    assert_eq!(engine.history(), &before);
}
