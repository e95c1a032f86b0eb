//! Pareto analysis — revenue concentration across categories.

use crate::categories::{self, CategoryRevenue};
use pulse_core::types::SalesRecord;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ParetoRow {
    pub category: String,
    pub revenue: f64,
    /// Running revenue total divided by the grand total. NaN (JSON
    /// `null`) when the grand total is zero.
    pub cumulative_share: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ConcentrationRisk {
    High,
    Medium,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ParetoAnalysis {
    pub rows: Vec<ParetoRow>,
    /// Categories whose cumulative share is within the threshold
    /// (default 80%).
    pub categories_within_threshold: u64,
    /// Cumulative share held by the top three categories; absent with
    /// fewer than three categories.
    pub top3_share: Option<f64>,
    pub concentration_risk: Option<ConcentrationRisk>,
}

/// Categories ranked by revenue with a running cumulative share.
pub fn cumulative_rows(records: &[SalesRecord]) -> Vec<ParetoRow> {
    let ranked: Vec<CategoryRevenue> = categories::revenue_by_category(records);
    let grand_total: f64 = ranked.iter().map(|r| r.revenue).sum();

    let mut running = 0.0;
    ranked
        .into_iter()
        .map(|r| {
            running += r.revenue;
            ParetoRow {
                category: r.category,
                revenue: r.revenue,
                cumulative_share: running / grand_total,
            }
        })
        .collect()
}

pub fn analyze(records: &[SalesRecord], threshold: f64, risk_threshold: f64) -> ParetoAnalysis {
    let rows = cumulative_rows(records);

    // NaN shares (zero grand total) compare false and count as outside
    // the threshold.
    let categories_within_threshold = rows
        .iter()
        .filter(|r| r.cumulative_share <= threshold)
        .count() as u64;

    let top3_share = (rows.len() >= 3).then(|| rows[2].cumulative_share);
    let concentration_risk = top3_share.map(|share| {
        if share > risk_threshold {
            ConcentrationRisk::High
        } else {
            ConcentrationRisk::Medium
        }
    });

    ParetoAnalysis {
        rows,
        categories_within_threshold,
        top3_share,
        concentration_risk,
    }
}
