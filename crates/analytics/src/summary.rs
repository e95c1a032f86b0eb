//! Headline dashboard metrics.

use pulse_core::types::SalesRecord;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SummaryMetrics {
    pub total_revenue: f64,
    pub total_transactions: u64,
    /// Revenue divided by transaction count. NaN (JSON `null`) when
    /// there are no transactions.
    pub avg_order_value: f64,
    pub unique_categories: u64,
}

pub fn summarize(records: &[SalesRecord]) -> SummaryMetrics {
    let total_revenue: f64 = records.iter().map(|r| r.total_amount).sum();
    let total_transactions = records.len() as u64;
    let unique_categories = records
        .iter()
        .map(|r| r.category.as_str())
        .collect::<BTreeSet<_>>()
        .len() as u64;

    SummaryMetrics {
        total_revenue,
        total_transactions,
        avg_order_value: total_revenue / total_transactions as f64,
        unique_categories,
    }
}
