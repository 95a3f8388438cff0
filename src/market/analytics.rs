//! Read-only queries over market history.
//!
//! These work on any [`History`], including one restored from a save, and are
//! also exposed as methods on [`MarketEngine`].

use super::engine::MarketEngine;
use super::types::{History, MarketReading, MarketSnapshot};
use crate::core::constants::{MOMENTUM_LATEST_WEIGHT, MOMENTUM_PREVIOUS_WEIGHT};
use crate::property::PropertyCategory;
use log::warn;

/// Most recent month with data, if any.
pub fn latest_month(history: &History) -> Option<u32> {
    history.keys().next_back().copied()
}

/// Snapshots for the latest month, each annotated with its temperature.
pub fn latest_readings(history: &History) -> Vec<MarketReading> {
    history
        .values()
        .next_back()
        .map(|snapshots| snapshots.iter().copied().map(MarketReading::from).collect())
        .unwrap_or_default()
}

fn find(snapshots: &[MarketSnapshot], category: PropertyCategory) -> Option<&MarketSnapshot> {
    snapshots.iter().find(|s| s.category == category)
}

fn percent_change(from: f64, to: f64) -> f64 {
    if from == 0.0 {
        warn!("price trend skipped: previous average price is zero");
        return 0.0;
    }
    (to - from) / from * 100.0
}

/// Month-over-month price change (%) for a category, blended with the prior change.
///
/// Returns 0.0 with fewer than two months of history or when either of the two
/// latest months lacks the category. With a third month that has the category,
/// the result is `latest * 0.7 + previous * 0.3`.
pub fn price_trend(history: &History, category: PropertyCategory) -> f64 {
    let mut months = history.values().rev();
    let (Some(current), Some(previous)) = (months.next(), months.next()) else {
        return 0.0;
    };
    let (Some(current), Some(previous)) = (find(current, category), find(previous, category))
    else {
        return 0.0;
    };

    let latest_change = percent_change(previous.avg_price_per_unit, current.avg_price_per_unit);

    match months.next().and_then(|older| find(older, category)) {
        Some(older) => {
            let previous_change =
                percent_change(older.avg_price_per_unit, previous.avg_price_per_unit);
            latest_change * MOMENTUM_LATEST_WEIGHT + previous_change * MOMENTUM_PREVIOUS_WEIGHT
        }
        None => latest_change,
    }
}

/// The latest snapshot with the highest average cap rate.
///
/// Ties go to the first snapshot in category order.
pub fn best_investment(history: &History) -> Option<MarketSnapshot> {
    history.values().next_back()?.iter().copied().reduce(|best, s| {
        if s.avg_cap_rate > best.avg_cap_rate {
            s
        } else {
            best
        }
    })
}

impl<R> MarketEngine<R> {
    pub fn latest_month(&self) -> Option<u32> {
        latest_month(self.history())
    }

    /// Latest month's snapshots with temperature labels; empty before any advance.
    pub fn latest(&self) -> Vec<MarketReading> {
        latest_readings(self.history())
    }

    pub fn trend(&self, category: PropertyCategory) -> f64 {
        price_trend(self.history(), category)
    }

    pub fn best_investment(&self) -> Option<MarketSnapshot> {
        best_investment(self.history())
    }
}
