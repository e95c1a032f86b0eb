//! Dashboard payload assembly — the full recompute for one interaction.

use crate::builders;
use crate::figure::{Figure, HeatmapFigure};
use chrono::{DateTime, Utc};
use pulse_analytics::{
    categories, demographics, growth, heatmap, insights, pareto, summary, trend,
    ConcentrationRisk, KeyInsights, SummaryMetrics,
};
use pulse_core::config::DashboardConfig;
use pulse_core::types::SalesRecord;
use serde::{Deserialize, Serialize};
use tracing::debug;
use utoipa::ToSchema;

/// Metric tiles beside the Pareto chart.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ParetoTiles {
    pub categories_within_threshold: u64,
    pub top3_share: Option<f64>,
    pub concentration_risk: Option<ConcentrationRisk>,
}

/// Everything one dashboard render needs, recomputed per request from
/// the filtered rows.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DashboardPayload {
    pub summary: SummaryMetrics,
    pub insights: KeyInsights,
    pub pareto_tiles: ParetoTiles,
    pub daily_trend: Figure,
    pub top_categories: Figure,
    pub pareto: Figure,
    pub monthly_heatmap: HeatmapFigure,
    pub age_spending: Figure,
    pub gender_revenue: Figure,
    pub price_elasticity: Figure,
    pub growth_consistency: Figure,
    pub generated_at: DateTime<Utc>,
}

/// Stateless assembly of the six pipelines plus summary and insight
/// tiles. Empty input produces empty figures, never an error.
pub fn build_dashboard(
    records: &[SalesRecord],
    config: &DashboardConfig,
    annotate: bool,
) -> DashboardPayload {
    debug!(rows = records.len(), annotate, "Building dashboard payload");

    let pareto_analysis = pareto::analyze(
        records,
        config.pareto_threshold,
        config.concentration_risk_threshold,
    );

    DashboardPayload {
        summary: summary::summarize(records),
        insights: insights::key_insights(records),
        pareto_tiles: ParetoTiles {
            categories_within_threshold: pareto_analysis.categories_within_threshold,
            top3_share: pareto_analysis.top3_share,
            concentration_risk: pareto_analysis.concentration_risk,
        },
        daily_trend: builders::daily_trend(&trend::daily_revenue(records), annotate),
        top_categories: builders::top_categories(&categories::top_categories(
            records,
            config.top_category_limit,
        )),
        pareto: builders::pareto(&pareto_analysis, config.pareto_threshold),
        monthly_heatmap: builders::monthly_heatmap(&heatmap::monthly_by_category(records)),
        age_spending: builders::age_spending(&demographics::spending_by_age(records)),
        gender_revenue: builders::gender_revenue(&demographics::breakdown_by_gender(records)),
        price_elasticity: builders::price_elasticity(&growth::price_per_unit(records)),
        growth_consistency: builders::growth_consistency(&growth::growth_consistency(records)),
        generated_at: Utc::now(),
    }
}
