//! Chart builders — one per aggregation pipeline, mapped 1:1.

use crate::figure::{Annotation, Figure, HeatmapFigure, Series, SeriesKind, ThresholdLine};
use pulse_analytics::{
    AgeSpending, CategoryRevenue, DailyRevenue, GenderBreakdown, GrowthConsistency, HeatmapMatrix,
    ParetoAnalysis, PricePoint,
};
use serde_json::json;

pub fn daily_trend(rows: &[DailyRevenue], annotate: bool) -> Figure {
    let mut figure = Figure::new("Revenue Over Time", "Date", "Daily Revenue ($)");
    figure.series.push(Series {
        name: "Daily Revenue".into(),
        kind: SeriesKind::Line,
        x: rows.iter().map(|r| json!(r.date)).collect(),
        y: rows.iter().map(|r| r.revenue).collect(),
        sizes: None,
        secondary_y: false,
    });

    if annotate {
        if let Some(latest) = rows.last() {
            figure.annotations.push(Annotation {
                x: json!(latest.date),
                y: latest.revenue,
                text: format!("Latest: ${:.0}", latest.revenue),
            });
        }
    }
    figure
}

pub fn top_categories(rows: &[CategoryRevenue]) -> Figure {
    let mut figure = Figure::new("Revenue by Category", "Category", "Total Revenue ($)");
    figure.series.push(Series {
        name: "Revenue".into(),
        kind: SeriesKind::Bar,
        x: rows.iter().map(|r| json!(r.category)).collect(),
        y: rows.iter().map(|r| r.revenue).collect(),
        sizes: None,
        secondary_y: false,
    });
    figure
}

/// Revenue bars plus the cumulative-share line on a secondary percent
/// axis, with the threshold marker.
pub fn pareto(analysis: &ParetoAnalysis, threshold: f64) -> Figure {
    let mut figure = Figure::new(
        "Pareto Analysis — Revenue Concentration",
        "Product Category",
        "Revenue ($)",
    );
    figure.secondary_y_title = Some("Cumulative %".into());

    let x: Vec<serde_json::Value> = analysis.rows.iter().map(|r| json!(r.category)).collect();
    figure.series.push(Series {
        name: "Revenue".into(),
        kind: SeriesKind::Bar,
        x: x.clone(),
        y: analysis.rows.iter().map(|r| r.revenue).collect(),
        sizes: None,
        secondary_y: false,
    });
    figure.series.push(Series {
        name: "Cumulative %".into(),
        kind: SeriesKind::Line,
        x,
        y: analysis
            .rows
            .iter()
            .map(|r| 100.0 * r.cumulative_share)
            .collect(),
        sizes: None,
        secondary_y: true,
    });
    figure.thresholds.push(ThresholdLine {
        value: 100.0 * threshold,
        label: format!("{:.0}% Line", 100.0 * threshold),
        secondary_y: true,
    });
    figure
}

pub fn monthly_heatmap(matrix: &HeatmapMatrix) -> HeatmapFigure {
    HeatmapFigure {
        title: "Monthly Revenue Heatmap".into(),
        x_title: "Month".into(),
        y_title: "Category".into(),
        x: matrix.months.clone(),
        y: matrix.categories.clone(),
        z: matrix.values.clone(),
    }
}

pub fn age_spending(rows: &[AgeSpending]) -> Figure {
    let mut figure = Figure::new("Average Spending by Age Group", "Age", "Avg Spending ($)");
    figure.series.push(Series {
        name: "Avg Spending".into(),
        kind: SeriesKind::Scatter,
        x: rows.iter().map(|r| json!(r.age)).collect(),
        y: rows.iter().map(|r| r.avg_spend).collect(),
        sizes: Some(rows.iter().map(|r| r.transactions as f64).collect()),
        secondary_y: false,
    });
    figure
}

pub fn gender_revenue(rows: &[GenderBreakdown]) -> Figure {
    let mut figure = Figure::new("Revenue by Gender", "Gender", "Total Revenue ($)");
    figure.series.push(Series {
        name: "Revenue".into(),
        kind: SeriesKind::Bar,
        x: rows.iter().map(|r| json!(r.gender)).collect(),
        y: rows.iter().map(|r| r.total_revenue).collect(),
        sizes: None,
        secondary_y: false,
    });
    figure
}

pub fn price_elasticity(rows: &[PricePoint]) -> Figure {
    let mut figure = Figure::new(
        "Price Elasticity Analysis",
        "Price per Unit ($)",
        "Total Quantity Sold",
    );
    figure.series.push(Series {
        name: "Categories".into(),
        kind: SeriesKind::Scatter,
        // Non-finite unit prices become null x values, rendered as gaps.
        x: rows.iter().map(|r| json!(r.price_per_unit)).collect(),
        y: rows.iter().map(|r| r.total_quantity as f64).collect(),
        sizes: Some(rows.iter().map(|r| r.total_amount).collect()),
        secondary_y: false,
    });
    figure
}

pub fn growth_consistency(rows: &[GrowthConsistency]) -> Figure {
    let mut figure = Figure::new(
        "Growth Consistency by Category",
        "Category",
        "Months with Growth (%)",
    );
    figure.y_range = Some([0.0, 1.0]);
    figure.series.push(Series {
        name: "Growth Consistency".into(),
        kind: SeriesKind::Bar,
        x: rows.iter().map(|r| json!(r.category)).collect(),
        y: rows.iter().map(|r| r.consistency).collect(),
        sizes: None,
        secondary_y: false,
    });
    figure
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn trend_rows() -> Vec<DailyRevenue> {
        vec![
            DailyRevenue {
                date: NaiveDate::from_ymd_opt(2023, 1, 5).unwrap(),
                revenue: 100.0,
            },
            DailyRevenue {
                date: NaiveDate::from_ymd_opt(2023, 1, 6).unwrap(),
                revenue: 250.0,
            },
        ]
    }

    #[test]
    fn test_trend_annotation_toggle() {
        let annotated = daily_trend(&trend_rows(), true);
        assert_eq!(annotated.annotations.len(), 1);
        assert_eq!(annotated.annotations[0].text, "Latest: $250");

        let plain = daily_trend(&trend_rows(), false);
        assert!(plain.annotations.is_empty());
    }

    #[test]
    fn test_trend_annotation_skipped_for_empty_data() {
        let figure = daily_trend(&[], true);
        assert!(figure.annotations.is_empty());
        assert!(figure.series[0].x.is_empty());
    }

    #[test]
    fn test_pareto_has_secondary_axis_and_threshold() {
        let analysis = ParetoAnalysis {
            rows: vec![
                pulse_analytics::ParetoRow {
                    category: "A".into(),
                    revenue: 80.0,
                    cumulative_share: 0.8,
                },
                pulse_analytics::ParetoRow {
                    category: "B".into(),
                    revenue: 20.0,
                    cumulative_share: 1.0,
                },
            ],
            categories_within_threshold: 1,
            top3_share: None,
            concentration_risk: None,
        };
        let figure = pareto(&analysis, 0.8);
        assert_eq!(figure.series.len(), 2);
        assert!(figure.series[1].secondary_y);
        assert!((figure.series[1].y[1] - 100.0).abs() < 1e-9);
        assert_eq!(figure.thresholds[0].label, "80% Line");
    }

    #[test]
    fn test_growth_consistency_fixed_range() {
        let figure = growth_consistency(&[]);
        assert_eq!(figure.y_range, Some([0.0, 1.0]));
    }
}
