//! Price Category Module
//! Derives the price tier of a listing from a fixed breakpoint table.

use serde::Serialize;
use std::fmt;

/// Name of the derived column appended to every loaded dataset.
pub const PRICE_CATEGORY_COLUMN: &str = "price_category";

/// Price tier of a single listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum PriceCategory {
    Budget,
    #[serde(rename = "Mid-Range")]
    MidRange,
    Premium,
    Luxury,
}

impl PriceCategory {
    /// All tiers in ascending price order.
    pub const ALL: [PriceCategory; 4] = [
        PriceCategory::Budget,
        PriceCategory::MidRange,
        PriceCategory::Premium,
        PriceCategory::Luxury,
    ];

    pub fn label(self) -> &'static str {
        match self {
            PriceCategory::Budget => "Budget",
            PriceCategory::MidRange => "Mid-Range",
            PriceCategory::Premium => "Premium",
            PriceCategory::Luxury => "Luxury",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.label() == label)
    }
}

impl fmt::Display for PriceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Right-closed upper bounds: a price `p` belongs to the first tier whose
/// bound satisfies `p <= bound`. Prices above the last bound are Luxury.
pub const BREAKPOINTS: [(f64, PriceCategory); 3] = [
    (100_000.0, PriceCategory::Budget),
    (250_000.0, PriceCategory::MidRange),
    (500_000.0, PriceCategory::Premium),
];

/// Assigns price tiers.
pub struct Categorizer;

impl Categorizer {
    /// Classify a price. Zero and negative prices fall into Budget.
    pub fn categorize(price: f64) -> PriceCategory {
        BREAKPOINTS
            .iter()
            .find(|(upper, _)| price <= *upper)
            .map(|(_, category)| *category)
            .unwrap_or(PriceCategory::Luxury)
    }

    /// Tier labels for a price column, in record order.
    pub fn categorize_all(prices: &[f64]) -> Vec<&'static str> {
        prices
            .iter()
            .map(|&p| Self::categorize(p).label())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundaries_are_right_closed() {
        assert_eq!(Categorizer::categorize(100_000.0), PriceCategory::Budget);
        assert_eq!(Categorizer::categorize(100_000.01), PriceCategory::MidRange);
        assert_eq!(Categorizer::categorize(250_000.0), PriceCategory::MidRange);
        assert_eq!(Categorizer::categorize(250_000.01), PriceCategory::Premium);
        assert_eq!(Categorizer::categorize(500_000.0), PriceCategory::Premium);
        assert_eq!(Categorizer::categorize(500_000.01), PriceCategory::Luxury);
    }

    #[test]
    fn zero_and_negative_prices_are_budget() {
        assert_eq!(Categorizer::categorize(0.0), PriceCategory::Budget);
        assert_eq!(Categorizer::categorize(-1.0), PriceCategory::Budget);
        assert_eq!(Categorizer::categorize(f64::MIN), PriceCategory::Budget);
    }

    #[test]
    fn categorize_is_deterministic() {
        for p in [0.0, 99_999.0, 180_000.0, 420_000.0, 1e9] {
            assert_eq!(Categorizer::categorize(p), Categorizer::categorize(p));
        }
        assert_eq!(Categorizer::categorize(f64::MAX), PriceCategory::Luxury);
    }

    #[test]
    fn labels_follow_tier_order() {
        let labels: Vec<_> = PriceCategory::ALL.iter().map(|c| c.label()).collect();
        assert_eq!(labels, ["Budget", "Mid-Range", "Premium", "Luxury"]);
        assert_eq!(PriceCategory::from_label("Mid-Range"), Some(PriceCategory::MidRange));
        assert_eq!(PriceCategory::from_label("Cheap"), None);
        assert_eq!(
            Categorizer::categorize_all(&[50_000.0, 150_000.0, 600_000.0]),
            vec!["Budget", "Mid-Range", "Luxury"]
        );
    }
}
