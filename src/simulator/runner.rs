//! Runs the market engine month by month and collects per-run statistics.

use super::config::SimConfig;
use super::report::{RunStats, SimReport};
use crate::market::{MarketEngine, Trend};
use crate::property::PropertyCategory;
use log::info;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Run the full simulation and return a report.
pub fn run_simulation(config: &SimConfig) -> SimReport {
    let mut all_runs = Vec::with_capacity(config.runs as usize);

    for run_idx in 0..config.runs {
        let rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed.wrapping_add(run_idx as u64)),
            None => ChaCha8Rng::from_entropy(),
        };

        let run = simulate_single_run(config, rng);

        if config.verbosity >= 1 {
            let best = run
                .best_counts
                .iter()
                .max_by_key(|(_, &count)| count)
                .map(|(category, _)| category.name())
                .unwrap_or("-");
            info!(
                "run {}/{}: {} months, {} trend changes, most frequent best investment {}",
                run_idx + 1,
                config.runs,
                run.history.len(),
                run.trend_changes,
                best
            );
        }

        all_runs.push(run);
    }

    SimReport::from_runs(all_runs)
}

/// Advances one engine through every configured month.
pub fn simulate_single_run(config: &SimConfig, rng: ChaCha8Rng) -> RunStats {
    let mut engine = MarketEngine::with_config(config.market.clone(), rng);
    let mut stats = RunStats::default();
    let mut trend: Trend = engine.conditions().trend;

    for month in 1..=config.months {
        let snapshots = engine.advance(month);

        if engine.conditions().trend != trend {
            stats.trend_changes += 1;
            trend = engine.conditions().trend;
        }
        if let Some(best) = engine.best_investment() {
            *stats.best_counts.entry(best.category).or_insert(0) += 1;
        }

        if config.verbosity >= 2 {
            for s in &snapshots {
                info!(
                    "month {:>3} {:<17} price {:>10.2} rent {:>8.2} cap {:>5.2}% inv {:>3} dom {:>5.1} [{}]",
                    month,
                    s.category.name(),
                    s.avg_price_per_unit,
                    s.avg_rent_per_unit,
                    s.avg_cap_rate,
                    s.inventory,
                    s.days_on_market,
                    s.temperature()
                );
            }
        }
    }

    stats.final_trends = PropertyCategory::ALL
        .iter()
        .map(|&category| (category, engine.trend(category)))
        .collect();
    stats.final_conditions = Some(*engine.conditions());
    stats.history = engine.history().clone();
    stats
}
