//! Market history export and import.
//!
//! The serialized form is a JSON object keyed by month number as a string:
//! `{"1": [{"property_type": "Duplex", "avg_price_per_unit": ...}, ...]}`.
//! Temperature is never written; it is recomputed on read.

use super::types::{History, MarketSnapshot};
use crate::core::error::{EstateError, Result};
use std::collections::HashSet;

fn invalid(month: u32, reason: impl Into<String>) -> EstateError {
    EstateError::InvalidHistory {
        month,
        reason: reason.into(),
    }
}

fn check_aggregate(month: u32, snapshot: &MarketSnapshot, field: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(invalid(
            month,
            format!("{} {} is {}", snapshot.category, field, value),
        ));
    }
    Ok(())
}

/// Rejects histories that would corrupt trend and best-investment queries.
pub fn validate_history(history: &History) -> Result<()> {
    for (&month, snapshots) in history {
        if month == 0 {
            return Err(invalid(month, "month numbers start at 1"));
        }

        let mut seen = HashSet::new();
        for snapshot in snapshots {
            if !seen.insert(snapshot.category) {
                return Err(invalid(
                    month,
                    format!("duplicate {} snapshot", snapshot.category),
                ));
            }
            check_aggregate(month, snapshot, "avg_price_per_unit", snapshot.avg_price_per_unit)?;
            check_aggregate(month, snapshot, "avg_rent_per_unit", snapshot.avg_rent_per_unit)?;
            check_aggregate(month, snapshot, "avg_cap_rate", snapshot.avg_cap_rate)?;
            check_aggregate(month, snapshot, "days_on_market", snapshot.days_on_market)?;
        }
    }
    Ok(())
}

pub fn export_history_json(history: &History) -> Result<String> {
    Ok(serde_json::to_string_pretty(history)?)
}

/// Parses and validates a serialized history.
///
/// Missing required fields fail the whole import rather than defaulting.
pub fn import_history_json(json: &str) -> Result<History> {
    let history: History = serde_json::from_str(json)?;
    validate_history(&history)?;
    Ok(history)
}
