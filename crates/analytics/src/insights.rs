//! Key insight tiles summarizing the filtered dataset.

use crate::{categories, growth};
use pulse_core::types::SalesRecord;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TopCategory {
    pub category: String,
    pub revenue: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MostConsistent {
    pub category: String,
    pub consistency: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HighestPricePoint {
    pub category: String,
    pub price_per_unit: f64,
}

/// Tiles are absent rather than degenerate when the filtered data is
/// empty.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct KeyInsights {
    pub top_category: Option<TopCategory>,
    pub most_consistent: Option<MostConsistent>,
    pub highest_price_point: Option<HighestPricePoint>,
}

pub fn key_insights(records: &[SalesRecord]) -> KeyInsights {
    let top_category = categories::revenue_by_category(records)
        .into_iter()
        .next()
        .map(|r| TopCategory {
            category: r.category,
            revenue: r.revenue,
        });

    let most_consistent = growth::growth_consistency(records)
        .into_iter()
        .next()
        .map(|r| MostConsistent {
            category: r.category,
            consistency: r.consistency,
        });

    // Non-finite unit prices (zero-quantity categories) are skipped so
    // the tile names a category with a real price.
    let highest_price_point = growth::price_per_unit(records)
        .into_iter()
        .filter(|p| p.price_per_unit.is_finite())
        .max_by(|a, b| a.price_per_unit.total_cmp(&b.price_per_unit))
        .map(|p| HighestPricePoint {
            category: p.category,
            price_per_unit: p.price_per_unit,
        });

    KeyInsights {
        top_category,
        most_consistent,
        highest_price_point,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pulse_core::types::MonthKey;

    fn record(date: &str, category: &str, quantity: u32, amount: f64) -> SalesRecord {
        let date = NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap();
        SalesRecord {
            date,
            month: MonthKey::from_date(date),
            category: category.to_string(),
            quantity,
            total_amount: amount,
            age: 30,
            gender: "Female".to_string(),
        }
    }

    #[test]
    fn test_insights_pick_expected_categories() {
        let rows = vec![
            record("2023-01-05", "Beauty", 10, 500.0),
            record("2023-02-05", "Beauty", 10, 600.0),
            record("2023-01-09", "Clothing", 2, 300.0),
            record("2023-02-09", "Clothing", 2, 200.0),
        ];
        let insights = key_insights(&rows);

        let top = insights.top_category.unwrap();
        assert_eq!(top.category, "Beauty");
        assert!((top.revenue - 1100.0).abs() < 1e-9);

        assert_eq!(insights.most_consistent.unwrap().category, "Beauty");

        let price = insights.highest_price_point.unwrap();
        assert_eq!(price.category, "Clothing");
        assert!((price.price_per_unit - 125.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_quantity_category_is_skipped_for_price_tile() {
        let rows = vec![
            record("2023-01-05", "GiftCards", 0, 100.0),
            record("2023-01-09", "Beauty", 2, 100.0),
        ];
        let insights = key_insights(&rows);
        assert_eq!(insights.highest_price_point.unwrap().category, "Beauty");
    }

    #[test]
    fn test_empty_input_has_no_tiles() {
        let insights = key_insights(&[]);
        assert!(insights.top_category.is_none());
        assert!(insights.most_consistent.is_none());
        assert!(insights.highest_price_point.is_none());
    }
}
