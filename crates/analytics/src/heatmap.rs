//! Month × category revenue matrix.

use pulse_core::types::{MonthKey, SalesRecord};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HeatmapMatrix {
    /// Month buckets ascending, rendered `YYYY-MM`.
    pub months: Vec<String>,
    /// Categories sorted ascending; one matrix row per category.
    pub categories: Vec<String>,
    /// `values[i][j]` is revenue for `categories[i]` in `months[j]`,
    /// 0.0 where a pair has no sales.
    pub values: Vec<Vec<f64>>,
}

pub fn monthly_by_category(records: &[SalesRecord]) -> HeatmapMatrix {
    let mut months: BTreeSet<MonthKey> = BTreeSet::new();
    let mut by_category: BTreeMap<String, BTreeMap<MonthKey, f64>> = BTreeMap::new();

    for record in records {
        months.insert(record.month);
        *by_category
            .entry(record.category.clone())
            .or_default()
            .entry(record.month)
            .or_insert(0.0) += record.total_amount;
    }

    let month_keys: Vec<MonthKey> = months.into_iter().collect();
    let categories: Vec<String> = by_category.keys().cloned().collect();
    let values: Vec<Vec<f64>> = by_category
        .values()
        .map(|row| {
            month_keys
                .iter()
                .map(|month| row.get(month).copied().unwrap_or(0.0))
                .collect()
        })
        .collect();

    HeatmapMatrix {
        months: month_keys.iter().map(MonthKey::to_string).collect(),
        categories,
        values,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn record(date: &str, category: &str, amount: f64) -> SalesRecord {
        let date = NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap();
        SalesRecord {
            date,
            month: MonthKey::from_date(date),
            category: category.to_string(),
            quantity: 1,
            total_amount: amount,
            age: 30,
            gender: "Female".to_string(),
        }
    }

    fn sample() -> Vec<SalesRecord> {
        vec![
            record("2023-01-05", "Beauty", 100.0),
            record("2023-01-20", "Beauty", 50.0),
            record("2023-01-09", "Clothing", 80.0),
            record("2023-02-14", "Beauty", 30.0),
        ]
    }

    #[test]
    fn test_pivot_with_zero_fill() {
        let matrix = monthly_by_category(&sample());
        assert_eq!(matrix.months, vec!["2023-01", "2023-02"]);
        assert_eq!(matrix.categories, vec!["Beauty", "Clothing"]);
        assert_eq!(matrix.values[0], vec![150.0, 30.0]);
        // Clothing has no February sales — filled with zero.
        assert_eq!(matrix.values[1], vec![80.0, 0.0]);
    }

    #[test]
    fn test_row_and_column_sums_match_aggregates() {
        let rows = sample();
        let matrix = monthly_by_category(&rows);

        for (i, category) in matrix.categories.iter().enumerate() {
            let row_sum: f64 = matrix.values[i].iter().sum();
            let expected: f64 = rows
                .iter()
                .filter(|r| &r.category == category)
                .map(|r| r.total_amount)
                .sum();
            assert!((row_sum - expected).abs() < 1e-9);
        }

        for (j, month) in matrix.months.iter().enumerate() {
            let col_sum: f64 = matrix.values.iter().map(|row| row[j]).sum();
            let expected: f64 = rows
                .iter()
                .filter(|r| &r.month.to_string() == month)
                .map(|r| r.total_amount)
                .sum();
            assert!((col_sum - expected).abs() < 1e-9);
        }
    }

    #[test]
    fn test_empty_input() {
        let matrix = monthly_by_category(&[]);
        assert!(matrix.months.is_empty());
        assert!(matrix.categories.is_empty());
        assert!(matrix.values.is_empty());
    }
}
