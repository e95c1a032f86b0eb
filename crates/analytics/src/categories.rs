//! Revenue by product category.

use pulse_core::types::SalesRecord;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CategoryRevenue {
    pub category: String,
    pub revenue: f64,
}

/// Per-category revenue sorted descending; ties break on category name
/// so the ordering is deterministic.
pub fn revenue_by_category(records: &[SalesRecord]) -> Vec<CategoryRevenue> {
    let mut by_category: BTreeMap<String, f64> = BTreeMap::new();
    for record in records {
        *by_category.entry(record.category.clone()).or_insert(0.0) += record.total_amount;
    }

    let mut rows: Vec<CategoryRevenue> = by_category
        .into_iter()
        .map(|(category, revenue)| CategoryRevenue { category, revenue })
        .collect();
    rows.sort_by(|a, b| {
        b.revenue
            .total_cmp(&a.revenue)
            .then_with(|| a.category.cmp(&b.category))
    });
    rows
}

/// The first `limit` categories by revenue.
pub fn top_categories(records: &[SalesRecord], limit: usize) -> Vec<CategoryRevenue> {
    revenue_by_category(records)
        .into_iter()
        .take(limit)
        .collect()
}
