use crate::core::constants::{
    BASE_EXPENSE_RATIO, EXPENSE_RATIO_VARIATION, MONTHS_PER_YEAR, RATING_BELOW_AVERAGE_CAP_RATE,
    RATING_MONEY_PIT_CAP_RATE, RATING_PREMIUM_CAP_RATE, RATING_SOLID_CAP_RATE,
};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The fixed set of rental property classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PropertyCategory {
    Duplex,
    Triplex,
    Fourplex,
    Apartment,
    #[serde(rename = "Apartment Complex")]
    ApartmentComplex,
}

impl PropertyCategory {
    /// All categories in market iteration order.
    pub const ALL: [PropertyCategory; 5] = [
        PropertyCategory::Duplex,
        PropertyCategory::Triplex,
        PropertyCategory::Fourplex,
        PropertyCategory::Apartment,
        PropertyCategory::ApartmentComplex,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            PropertyCategory::Duplex => "Duplex",
            PropertyCategory::Triplex => "Triplex",
            PropertyCategory::Fourplex => "Fourplex",
            PropertyCategory::Apartment => "Apartment",
            PropertyCategory::ApartmentComplex => "Apartment Complex",
        }
    }

    /// Parses a display name (case-insensitive). Used by the simulator CLI.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(name.trim()))
    }
}

impl fmt::Display for PropertyCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Physical and financial inputs for a property, before the expense ratio is drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PropertyTerms {
    pub units: u32,
    pub price_per_unit: f64,
    /// Percentage, 0-100.
    pub management_fee_percent: f64,
    /// Monthly rent per unit.
    pub rent_per_unit: f64,
    pub maintenance_per_unit: f64,
}

/// A rental asset: either a real listing/holding or a disposable market sample.
///
/// The expense ratio is sampled once in [`Property::new`] and never recomputed,
/// so two properties built from identical terms can value differently.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    #[serde(rename = "property_type")]
    pub category: PropertyCategory,
    pub address: String,
    pub units: u32,
    pub price_per_unit: f64,
    pub management_fee_percent: f64,
    pub rent_per_unit: f64,
    pub maintenance_per_unit: f64,
    expense_ratio: f64,
}

impl Property {
    /// Creates a property, drawing its expense ratio as 35% ± 5%.
    pub fn new(
        category: PropertyCategory,
        address: String,
        terms: PropertyTerms,
        rng: &mut impl Rng,
    ) -> Self {
        let variation = rng.gen_range(-EXPENSE_RATIO_VARIATION..=EXPENSE_RATIO_VARIATION);
        Self::restore(category, address, terms, BASE_EXPENSE_RATIO + variation)
    }

    /// Rebuilds a property with a previously drawn expense ratio.
    pub fn restore(
        category: PropertyCategory,
        address: String,
        terms: PropertyTerms,
        expense_ratio: f64,
    ) -> Self {
        Self {
            category,
            address,
            units: terms.units,
            price_per_unit: terms.price_per_unit,
            management_fee_percent: terms.management_fee_percent,
            rent_per_unit: terms.rent_per_unit,
            maintenance_per_unit: terms.maintenance_per_unit,
            expense_ratio,
        }
    }

    pub fn expense_ratio(&self) -> f64 {
        self.expense_ratio
    }

    pub fn total_price(&self) -> f64 {
        self.units as f64 * self.price_per_unit
    }

    /// Annual gross rent.
    pub fn gross_income(&self) -> f64 {
        self.units as f64 * self.rent_per_unit * MONTHS_PER_YEAR as f64
    }

    pub fn management_fee(&self) -> f64 {
        self.gross_income() * (self.management_fee_percent / 100.0)
    }

    pub fn total_expenses(&self) -> f64 {
        self.gross_income() * self.expense_ratio
    }

    pub fn net_income(&self) -> f64 {
        self.gross_income() - self.total_expenses()
    }

    /// Net income as a percentage of total price; 0 when the price is 0.
    pub fn cap_rate(&self) -> f64 {
        let total_price = self.total_price();
        if total_price == 0.0 {
            return 0.0;
        }
        self.net_income() / total_price * 100.0
    }

    pub fn valuation(&self) -> Valuation {
        Valuation {
            total_price: self.total_price(),
            gross_income: self.gross_income(),
            management_fee: self.management_fee(),
            total_expenses: self.total_expenses(),
            net_income: self.net_income(),
            cap_rate: self.cap_rate(),
        }
    }

    pub fn rating(&self) -> InvestmentRating {
        InvestmentRating::from_cap_rate(self.cap_rate())
    }
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let v = self.valuation();
        writeln!(f, "Type: {}", self.category)?;
        writeln!(f, "Address: {}", self.address)?;
        writeln!(f, "Units: {}", self.units)?;
        writeln!(f, "Price per unit: {}", format_currency(self.price_per_unit))?;
        writeln!(f, "Total Price: {}", format_currency(v.total_price))?;
        writeln!(f, "Rent per unit: {}", format_currency(self.rent_per_unit))?;
        writeln!(f, "Gross Income: {}", format_currency(v.gross_income))?;
        writeln!(f, "Management Fee: {}", format_currency(v.management_fee))?;
        writeln!(f, "Expenses: {}", format_currency(v.total_expenses))?;
        writeln!(f, "Net Income: {}", format_currency(v.net_income))?;
        writeln!(f, "CAP Rate: {:.2}%", v.cap_rate)?;
        write!(f, "{}", self.rating().label())
    }
}

/// The derived metrics of a property at one point in time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Valuation {
    pub total_price: f64,
    pub gross_income: f64,
    pub management_fee: f64,
    pub total_expenses: f64,
    pub net_income: f64,
    pub cap_rate: f64,
}

/// Read-time quality label derived from cap rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvestmentRating {
    Premium,
    Solid,
    Average,
    BelowAverage,
    MoneyPit,
}

impl InvestmentRating {
    pub fn from_cap_rate(cap_rate: f64) -> Self {
        if cap_rate >= RATING_PREMIUM_CAP_RATE {
            InvestmentRating::Premium
        } else if cap_rate >= RATING_SOLID_CAP_RATE {
            InvestmentRating::Solid
        } else if cap_rate <= RATING_MONEY_PIT_CAP_RATE {
            InvestmentRating::MoneyPit
        } else if cap_rate <= RATING_BELOW_AVERAGE_CAP_RATE {
            InvestmentRating::BelowAverage
        } else {
            InvestmentRating::Average
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            InvestmentRating::Premium => "Premium Investment!",
            InvestmentRating::Solid => "Solid Deal",
            InvestmentRating::Average => "Average",
            InvestmentRating::BelowAverage => "Below Average",
            InvestmentRating::MoneyPit => "Money Pit",
        }
    }
}

/// Formats a dollar amount with thousands separators, e.g. `$1,234,567.89`.
pub fn format_currency(amount: f64) -> String {
    let sign = if amount < 0.0 { "-" } else { "" };
    let fixed = format!("{:.2}", amount.abs());
    let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("{sign}${grouped}.{cents}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn terms(units: u32, price_per_unit: f64, rent_per_unit: f64) -> PropertyTerms {
        PropertyTerms {
            units,
            price_per_unit,
            management_fee_percent: 6.0,
            rent_per_unit,
            maintenance_per_unit: 400.0,
        }
    }

    fn fixed(units: u32, price_per_unit: f64, rent_per_unit: f64, ratio: f64) -> Property {
        Property::restore(
            PropertyCategory::Duplex,
            "0001 Oak St".to_string(),
            terms(units, price_per_unit, rent_per_unit),
            ratio,
        )
    }

    #[test]
    fn test_derived_metrics() {
        let p = fixed(2, 200_000.0, 1_500.0, 0.35);
        assert_eq!(p.total_price(), 400_000.0);
        assert_eq!(p.gross_income(), 36_000.0);
        assert!((p.management_fee() - 2_160.0).abs() < 1e-9);
        assert!((p.total_expenses() - 12_600.0).abs() < 1e-9);
        assert!((p.net_income() - 23_400.0).abs() < 1e-9);
        assert!((p.cap_rate() - 5.85).abs() < 1e-9);
    }

    #[test]
    fn test_cap_rate_zero_price() {
        let p = fixed(2, 0.0, 1_500.0, 0.35);
        assert_eq!(p.cap_rate(), 0.0);

        let p = fixed(0, 200_000.0, 1_500.0, 0.35);
        assert_eq!(p.cap_rate(), 0.0);
    }

    #[test]
    fn test_expense_ratio_within_bounds() {
        let mut rng = ChaCha8Rng::seed_from_u64(12345);
        for _ in 0..1000 {
            let p = Property::new(
                PropertyCategory::Triplex,
                String::new(),
                terms(3, 180_000.0, 1_800.0),
                &mut rng,
            );
            assert!(p.expense_ratio() >= 0.30 - 1e-12);
            assert!(p.expense_ratio() <= 0.40 + 1e-12);
        }
    }

    #[test]
    fn test_expense_ratio_is_stable_across_queries() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let p = Property::new(
            PropertyCategory::Fourplex,
            String::new(),
            terms(4, 200_000.0, 1_700.0),
            &mut rng,
        );
        let first = p.valuation();
        for _ in 0..10 {
            assert_eq!(p.valuation(), first);
        }
    }

    #[test]
    fn test_identical_terms_can_value_differently() {
        let mut rng = ChaCha8Rng::seed_from_u64(99);
        let a = Property::new(
            PropertyCategory::Duplex,
            String::new(),
            terms(2, 200_000.0, 1_500.0),
            &mut rng,
        );
        let b = Property::new(
            PropertyCategory::Duplex,
            String::new(),
            terms(2, 200_000.0, 1_500.0),
            &mut rng,
        );
        assert_ne!(a.expense_ratio(), b.expense_ratio());
        assert_ne!(a.cap_rate(), b.cap_rate());
    }

    #[test]
    fn test_rating_thresholds() {
        assert_eq!(InvestmentRating::from_cap_rate(7.0), InvestmentRating::Premium);
        assert_eq!(InvestmentRating::from_cap_rate(6.0), InvestmentRating::Solid);
        assert_eq!(InvestmentRating::from_cap_rate(5.0), InvestmentRating::Average);
        assert_eq!(InvestmentRating::from_cap_rate(4.0), InvestmentRating::BelowAverage);
        assert_eq!(InvestmentRating::from_cap_rate(3.0), InvestmentRating::MoneyPit);
        assert_eq!(InvestmentRating::from_cap_rate(0.0), InvestmentRating::MoneyPit);
    }

    #[test]
    fn test_category_serde_names() {
        let json = serde_json::to_string(&PropertyCategory::ApartmentComplex).unwrap();
        assert_eq!(json, "\"Apartment Complex\"");
        let parsed: PropertyCategory = serde_json::from_str("\"Duplex\"").unwrap();
        assert_eq!(parsed, PropertyCategory::Duplex);
    }

    #[test]
    fn test_category_from_name() {
        assert_eq!(
            PropertyCategory::from_name("apartment complex"),
            Some(PropertyCategory::ApartmentComplex)
        );
        assert_eq!(PropertyCategory::from_name("Castle"), None);
    }

    #[test]
    fn test_property_serde_keeps_expense_ratio() {
        let p = fixed(3, 190_000.0, 1_650.0, 0.3123);
        let json = serde_json::to_string(&p).unwrap();
        assert!(json.contains("\"property_type\":\"Duplex\""));
        let back: Property = serde_json::from_str(&json).unwrap();
        assert_eq!(back.expense_ratio(), 0.3123);
        assert_eq!(back, p);
    }

    #[test]
    fn test_property_missing_expense_ratio_is_rejected() {
        let json = r#"{"property_type":"Duplex","address":"x","units":2,
            "price_per_unit":1.0,"management_fee_percent":5.0,
            "rent_per_unit":1.0,"maintenance_per_unit":1.0}"#;
        assert!(serde_json::from_str::<Property>(json).is_err());
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(0.0), "$0.00");
        assert_eq!(format_currency(999.5), "$999.50");
        assert_eq!(format_currency(1_234_567.891), "$1,234,567.89");
        assert_eq!(format_currency(-2_500.0), "-$2,500.00");
    }

    #[test]
    fn test_display_card() {
        let p = fixed(2, 200_000.0, 1_500.0, 0.35);
        let card = p.to_string();
        assert!(card.contains("Type: Duplex"));
        assert!(card.contains("Total Price: $400,000.00"));
        assert!(card.contains("CAP Rate: 5.85%"));
        assert!(card.ends_with("Solid Deal"));
    }
}
