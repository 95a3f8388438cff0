//! Simulation report generation.

use crate::core::error::Result;
use crate::market::{History, MacroConditions};
use crate::property::PropertyCategory;
use std::collections::BTreeMap;
use std::fmt;
use std::io::Write;

/// Results of one simulated run.
#[derive(Debug, Clone, Default)]
pub struct RunStats {
    pub history: History,
    /// Months in which the macro trend switched
    pub trend_changes: u32,
    /// How many months each category was the best investment
    pub best_counts: BTreeMap<PropertyCategory, u32>,
    /// Momentum-blended trend per category at the end of the run
    pub final_trends: Vec<(PropertyCategory, f64)>,
    pub final_conditions: Option<MacroConditions>,
}

/// Per-category aggregates across every month of every run.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryStats {
    pub category: PropertyCategory,
    pub mean_price: f64,
    pub min_price: f64,
    pub max_price: f64,
    pub mean_rent: f64,
    pub mean_cap_rate: f64,
    pub mean_final_trend: f64,
    /// Share of months (0-1) in which this category had the best cap rate
    pub best_share: f64,
}

/// Aggregated results from multiple simulation runs.
#[derive(Debug, Clone)]
pub struct SimReport {
    pub categories: Vec<CategoryStats>,
    pub avg_trend_changes: f64,
    pub runs: Vec<RunStats>,
}

impl SimReport {
    pub fn from_runs(runs: Vec<RunStats>) -> Self {
        let num_runs = runs.len().max(1) as f64;
        let total_months: u32 = runs.iter().map(|r| r.history.len() as u32).sum();

        let categories = PropertyCategory::ALL
            .iter()
            .map(|&category| {
                let snapshots: Vec<_> = runs
                    .iter()
                    .flat_map(|r| r.history.values())
                    .flat_map(|month| month.iter().filter(|s| s.category == category))
                    .collect();
                let n = snapshots.len().max(1) as f64;

                let mean_price = snapshots.iter().map(|s| s.avg_price_per_unit).sum::<f64>() / n;
                let min_price = snapshots
                    .iter()
                    .map(|s| s.avg_price_per_unit)
                    .fold(f64::INFINITY, f64::min);
                let max_price = snapshots
                    .iter()
                    .map(|s| s.avg_price_per_unit)
                    .fold(f64::NEG_INFINITY, f64::max);
                let mean_rent = snapshots.iter().map(|s| s.avg_rent_per_unit).sum::<f64>() / n;
                let mean_cap_rate = snapshots.iter().map(|s| s.avg_cap_rate).sum::<f64>() / n;

                let mean_final_trend = runs
                    .iter()
                    .flat_map(|r| r.final_trends.iter())
                    .filter(|(c, _)| *c == category)
                    .map(|(_, t)| t)
                    .sum::<f64>()
                    / num_runs;

                let best_months: u32 = runs
                    .iter()
                    .map(|r| r.best_counts.get(&category).copied().unwrap_or(0))
                    .sum();

                CategoryStats {
                    category,
                    mean_price,
                    min_price: if snapshots.is_empty() { 0.0 } else { min_price },
                    max_price: if snapshots.is_empty() { 0.0 } else { max_price },
                    mean_rent,
                    mean_cap_rate,
                    mean_final_trend,
                    best_share: best_months as f64 / total_months.max(1) as f64,
                }
            })
            .collect();

        let avg_trend_changes =
            runs.iter().map(|r| r.trend_changes as f64).sum::<f64>() / num_runs;

        Self {
            categories,
            avg_trend_changes,
            runs,
        }
    }

    /// The category that was most often the best investment.
    pub fn most_frequent_best(&self) -> Option<PropertyCategory> {
        self.categories
            .iter()
            .filter(|c| c.best_share > 0.0)
            .fold(None, |best: Option<&CategoryStats>, c| match best {
                Some(b) if b.best_share >= c.best_share => Some(b),
                _ => Some(c),
            })
            .map(|c| c.category)
    }
}

impl fmt::Display for SimReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "═══════════════════════════════════════════════════════════════════════════")?;
        writeln!(f, "                         MARKET SIMULATION REPORT")?;
        writeln!(f, "═══════════════════════════════════════════════════════════════════════════")?;
        writeln!(
            f,
            "Runs: {}   Avg trend changes per run: {:.2}\n",
            self.runs.len(),
            self.avg_trend_changes
        )?;
        writeln!(
            f,
            "  {:<17} {:>11} {:>11} {:>11} {:>8} {:>7} {:>8} {:>6}",
            "Category", "Avg $/unit", "Min", "Max", "Rent", "Cap %", "Trend %", "Best"
        )?;
        for c in &self.categories {
            writeln!(
                f,
                "  {:<17} {:>11.0} {:>11.0} {:>11.0} {:>8.0} {:>7.2} {:>8.2} {:>5.0}%",
                c.category.name(),
                c.mean_price,
                c.min_price,
                c.max_price,
                c.mean_rent,
                c.mean_cap_rate,
                c.mean_final_trend,
                c.best_share * 100.0
            )?;
        }
        if let Some(best) = self.most_frequent_best() {
            writeln!(f, "\nMost frequent best investment: {}", best)?;
        }
        Ok(())
    }
}

/// Writes a history as CSV: one row per month and category.
pub fn write_history_csv(history: &History, out: &mut impl Write) -> Result<()> {
    writeln!(
        out,
        "month,category,avg_price_per_unit,avg_rent_per_unit,avg_cap_rate,inventory,days_on_market,temperature"
    )?;
    for (month, snapshots) in history {
        for s in snapshots {
            writeln!(
                out,
                "{},{},{:.2},{:.2},{:.4},{},{:.2},{}",
                month,
                s.category.name(),
                s.avg_price_per_unit,
                s.avg_rent_per_unit,
                s.avg_cap_rate,
                s.inventory,
                s.days_on_market,
                s.temperature().label()
            )?;
        }
    }
    Ok(())
}
