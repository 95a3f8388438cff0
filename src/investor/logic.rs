//! Buying listings and closing out months.

use super::types::{Calendar, Difficulty, Investor, MonthReport};
use crate::core::constants::MONTHS_PER_YEAR;
use crate::core::error::{EstateError, Result};
use crate::market::MarketEngine;
use crate::property::{generate_listings, Property};
use log::info;
use rand::Rng;

impl Investor {
    /// New investor at year 1, month 1 with capital set by difficulty and fresh listings.
    pub fn new(name: impl Into<String>, difficulty: Difficulty, rng: &mut impl Rng) -> Self {
        Self {
            name: name.into(),
            difficulty,
            capital: difficulty.starting_capital(),
            properties: Vec::new(),
            available_properties: generate_listings(rng),
            calendar: Calendar::default(),
        }
    }

    /// Begins a game: a new investor whose listings come from the engine's
    /// generator, with the opening month's market already generated.
    pub fn start<R: Rng>(
        name: impl Into<String>,
        difficulty: Difficulty,
        engine: &mut MarketEngine<R>,
    ) -> Self {
        let investor = Self::new(name, difficulty, engine.rng_mut());
        engine.advance(investor.calendar.absolute_month());
        info!(
            "{} started on {} with ${:.2}",
            investor.name,
            difficulty.name(),
            investor.capital
        );
        investor
    }

    /// Buys the listing at `index`, moving it into the portfolio.
    ///
    /// Fails without changing anything if the index is out of range or the
    /// investor cannot cover the total price.
    pub fn buy(&mut self, index: usize) -> Result<&Property> {
        let price = self
            .available_properties
            .get(index)
            .ok_or(EstateError::NoSuchListing(index))?
            .total_price();

        if price > self.capital {
            return Err(EstateError::InsufficientCapital {
                needed: price,
                available: self.capital,
            });
        }

        let property = self.available_properties.remove(index);
        info!(
            "{} bought {} at {} for ${:.2}",
            self.name, property.category, property.address, price
        );
        self.capital -= price;
        self.properties.push(property);
        Ok(&self.properties[self.properties.len() - 1])
    }

    /// Listings the investor can currently afford, with their listing index.
    pub fn affordable_listings(&self) -> impl Iterator<Item = (usize, &Property)> {
        self.available_properties
            .iter()
            .enumerate()
            .filter(move |(_, p)| p.total_price() <= self.capital)
    }

    /// Net income from all owned properties for one month.
    pub fn monthly_cash_flow(&self) -> f64 {
        self.properties.iter().map(Property::net_income).sum::<f64>() / MONTHS_PER_YEAR as f64
    }

    /// Total purchase price of owned properties.
    pub fn portfolio_value(&self) -> f64 {
        self.properties.iter().map(Property::total_price).sum()
    }

    /// Mean cap rate across owned properties; 0 with an empty portfolio.
    pub fn average_cap_rate(&self) -> f64 {
        if self.properties.is_empty() {
            return 0.0;
        }
        self.properties.iter().map(Property::cap_rate).sum::<f64>() / self.properties.len() as f64
    }

    /// Closes the current month.
    ///
    /// Credits one month of cash flow, advances the calendar, generates the new
    /// month's market data and refreshes listings from the engine's generator.
    pub fn end_month<R: Rng>(&mut self, engine: &mut MarketEngine<R>) -> MonthReport {
        let income = self.monthly_cash_flow();
        self.capital += income;
        self.calendar.advance();

        let month = self.calendar.absolute_month();
        let snapshots = engine.advance(month);
        self.available_properties = generate_listings(engine.rng_mut());

        info!(
            "{} closed year {} month {}: income ${:.2}, capital ${:.2}",
            self.name, self.calendar.year, self.calendar.month, income, self.capital
        );

        MonthReport {
            month,
            income,
            snapshots,
        }
    }
}
