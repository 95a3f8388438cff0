use crate::core::constants::{
    EASY_STARTING_CAPITAL, HARD_STARTING_CAPITAL, MEDIUM_STARTING_CAPITAL, MONTHS_PER_YEAR,
};
use crate::market::MarketSnapshot;
use crate::property::Property;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn starting_capital(&self) -> f64 {
        match self {
            Difficulty::Easy => EASY_STARTING_CAPITAL,
            Difficulty::Medium => MEDIUM_STARTING_CAPITAL,
            Difficulty::Hard => HARD_STARTING_CAPITAL,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }
}

/// In-game date. `month` is always 1-12.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Calendar {
    pub year: u32,
    pub month: u32,
}

impl Default for Calendar {
    fn default() -> Self {
        Self { year: 1, month: 1 }
    }
}

impl Calendar {
    /// Moves to the next month, rolling December into January.
    pub fn advance(&mut self) {
        if self.month >= MONTHS_PER_YEAR {
            self.month = 1;
            self.year += 1;
        } else {
            self.month += 1;
        }
    }

    /// Months elapsed since the start, counting year 1 January as 1.
    ///
    /// This is the month number the market engine is keyed by.
    pub fn absolute_month(&self) -> u32 {
        (self.year.saturating_sub(1)) * MONTHS_PER_YEAR + self.month
    }
}

/// A player's holdings and the listings currently on offer to them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Investor {
    pub name: String,
    pub difficulty: Difficulty,
    pub capital: f64,
    pub properties: Vec<Property>,
    pub available_properties: Vec<Property>,
    #[serde(flatten)]
    pub calendar: Calendar,
}

/// What happened when a month closed.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthReport {
    /// Absolute month number the market generated.
    pub month: u32,
    pub income: f64,
    pub snapshots: Vec<MarketSnapshot>,
}
