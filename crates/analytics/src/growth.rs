//! Price-per-unit and month-over-month growth pipelines.

use pulse_core::types::{MonthKey, SalesRecord};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PricePoint {
    pub category: String,
    pub total_amount: f64,
    pub total_quantity: u64,
    /// Revenue divided by unit count. Non-finite (JSON `null`) for a
    /// category that sold zero units.
    pub price_per_unit: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct GrowthConsistency {
    pub category: String,
    /// Fraction of the category's months whose revenue grew over the
    /// previous month. The first month has no predecessor and counts
    /// as a non-growth month.
    pub consistency: f64,
}

/// Per-category revenue, unit count, and implied unit price, ascending
/// by category.
pub fn price_per_unit(records: &[SalesRecord]) -> Vec<PricePoint> {
    let mut by_category: BTreeMap<String, (f64, u64)> = BTreeMap::new();
    for record in records {
        let entry = by_category
            .entry(record.category.clone())
            .or_insert((0.0, 0));
        entry.0 += record.total_amount;
        entry.1 += u64::from(record.quantity);
    }

    by_category
        .into_iter()
        .map(|(category, (total_amount, total_quantity))| PricePoint {
            category,
            total_amount,
            total_quantity,
            price_per_unit: total_amount / total_quantity as f64,
        })
        .collect()
}

/// Growth consistency per category, sorted descending with name as the
/// tie-break.
pub fn growth_consistency(records: &[SalesRecord]) -> Vec<GrowthConsistency> {
    let mut series: BTreeMap<String, BTreeMap<MonthKey, f64>> = BTreeMap::new();
    for record in records {
        *series
            .entry(record.category.clone())
            .or_default()
            .entry(record.month)
            .or_insert(0.0) += record.total_amount;
    }

    let mut rows: Vec<GrowthConsistency> = series
        .into_iter()
        .map(|(category, months)| {
            let values: Vec<f64> = months.into_values().collect();
            let mut positive = 0usize;
            let mut prev: Option<f64> = None;
            for value in &values {
                if let Some(prev) = prev {
                    // (value - prev) / prev is inf when the previous
                    // month was zero and NaN when both are; NaN
                    // compares false and counts as non-growth.
                    if (value - prev) / prev > 0.0 {
                        positive += 1;
                    }
                }
                prev = Some(*value);
            }
            GrowthConsistency {
                category,
                consistency: positive as f64 / values.len() as f64,
            }
        })
        .collect();

    rows.sort_by(|a, b| {
        b.consistency
            .total_cmp(&a.consistency)
            .then_with(|| a.category.cmp(&b.category))
    });
    rows
}
