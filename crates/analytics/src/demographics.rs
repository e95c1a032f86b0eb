//! Customer demographics — spending by age and by gender.

use pulse_core::types::SalesRecord;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AgeSpending {
    pub age: u8,
    pub total_spend: f64,
    pub transactions: u64,
    pub avg_spend: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct GenderBreakdown {
    pub gender: String,
    pub total_revenue: f64,
    pub transaction_count: u64,
    pub avg_order_value: f64,
}

/// Per-age spend totals and means, ascending by age.
pub fn spending_by_age(records: &[SalesRecord]) -> Vec<AgeSpending> {
    let mut by_age: BTreeMap<u8, (f64, u64)> = BTreeMap::new();
    for record in records {
        let entry = by_age.entry(record.age).or_insert((0.0, 0));
        entry.0 += record.total_amount;
        entry.1 += 1;
    }

    by_age
        .into_iter()
        .map(|(age, (total_spend, transactions))| AgeSpending {
            age,
            total_spend,
            transactions,
            avg_spend: total_spend / transactions as f64,
        })
        .collect()
}

/// Per-gender sum, count, and mean, ascending by gender label.
pub fn breakdown_by_gender(records: &[SalesRecord]) -> Vec<GenderBreakdown> {
    let mut by_gender: BTreeMap<String, (f64, u64)> = BTreeMap::new();
    for record in records {
        let entry = by_gender.entry(record.gender.clone()).or_insert((0.0, 0));
        entry.0 += record.total_amount;
        entry.1 += 1;
    }

    by_gender
        .into_iter()
        .map(|(gender, (total_revenue, transaction_count))| GenderBreakdown {
            gender,
            total_revenue,
            transaction_count,
            avg_order_value: total_revenue / transaction_count as f64,
        })
        .collect()
}
