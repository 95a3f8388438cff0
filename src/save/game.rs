//! The save-file payload.

use crate::core::error::Result;
use crate::investor::Investor;
use crate::market::{validate_history, History, MacroConditions, MarketConfig, MarketEngine};
use chrono::Utc;
use log::debug;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Whether a save carries the engine's macro conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MacroPersistence {
    /// Store conditions and restore them on load.
    Persist,
    /// Leave conditions out; a restored engine starts with fresh random ones.
    #[default]
    Reroll,
}

/// Everything needed to resume a game: the investor plus the market's state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveGame {
    #[serde(flatten)]
    pub investor: Investor,
    pub market_history: History,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub macro_conditions: Option<MacroConditions>,
    /// Unix seconds (UTC) when the save was captured.
    #[serde(default)]
    pub last_save_time: i64,
}

impl SaveGame {
    pub fn capture<R>(
        investor: &Investor,
        engine: &MarketEngine<R>,
        persistence: MacroPersistence,
    ) -> Self {
        let macro_conditions = match persistence {
            MacroPersistence::Persist => Some(*engine.conditions()),
            MacroPersistence::Reroll => None,
        };
        Self {
            investor: investor.clone(),
            market_history: engine.history().clone(),
            macro_conditions,
            last_save_time: Utc::now().timestamp(),
        }
    }

    /// Checks the stored history before it reaches any analytics.
    pub fn validate(&self) -> Result<()> {
        validate_history(&self.market_history)
    }

    /// Splits the save back into an investor and a market engine.
    ///
    /// The engine gets the stored macro conditions when present, otherwise
    /// freshly randomized ones drawn from `rng`.
    pub fn restore<R: Rng>(self, config: MarketConfig, rng: R) -> Result<(Investor, MarketEngine<R>)> {
        let mut engine = MarketEngine::with_config(config, rng);
        engine.load_history(self.market_history)?;
        match self.macro_conditions {
            Some(conditions) => engine.set_conditions(conditions),
            None => debug!("save has no macro conditions; keeping fresh ones"),
        }
        Ok((self.investor, engine))
    }
}
