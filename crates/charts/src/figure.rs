//! Serializable chart model consumed by the dashboard frontend.
//!
//! The model is renderer-agnostic: x values are JSON scalars (dates,
//! labels, or numbers) and non-finite y values serialize as `null`,
//! which charting libraries render as gaps.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SeriesKind {
    Line,
    Bar,
    Scatter,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Series {
    pub name: String,
    pub kind: SeriesKind,
    #[schema(value_type = Vec<Object>)]
    pub x: Vec<serde_json::Value>,
    pub y: Vec<f64>,
    /// Per-point marker sizing for bubble charts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sizes: Option<Vec<f64>>,
    /// Plot against the secondary y-axis.
    #[serde(default)]
    pub secondary_y: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Annotation {
    #[schema(value_type = Object)]
    pub x: serde_json::Value,
    pub y: f64,
    pub text: String,
}

/// A horizontal reference line, e.g. the Pareto 80% marker.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ThresholdLine {
    pub value: f64,
    pub label: String,
    #[serde(default)]
    pub secondary_y: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Figure {
    pub title: String,
    pub x_title: String,
    pub y_title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secondary_y_title: Option<String>,
    pub series: Vec<Series>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub annotations: Vec<Annotation>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub thresholds: Vec<ThresholdLine>,
    /// Fixed y-axis range, e.g. `[0, 1]` for fraction charts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Vec<f64>>)]
    pub y_range: Option<[f64; 2]>,
}

impl Figure {
    pub fn new(
        title: impl Into<String>,
        x_title: impl Into<String>,
        y_title: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            x_title: x_title.into(),
            y_title: y_title.into(),
            secondary_y_title: None,
            series: Vec::new(),
            annotations: Vec::new(),
            thresholds: Vec::new(),
            y_range: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HeatmapFigure {
    pub title: String,
    pub x_title: String,
    pub y_title: String,
    pub x: Vec<String>,
    pub y: Vec<String>,
    pub z: Vec<Vec<f64>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_collections_are_omitted_from_json() {
        let figure = Figure::new("t", "x", "y");
        let json = serde_json::to_value(&figure).unwrap();
        assert!(json.get("annotations").is_none());
        assert!(json.get("thresholds").is_none());
        assert!(json.get("y_range").is_none());
    }

    #[test]
    fn test_non_finite_y_serializes_as_null() {
        let series = Series {
            name: "s".into(),
            kind: SeriesKind::Line,
            x: vec![serde_json::json!("a")],
            y: vec![f64::INFINITY],
            sizes: None,
            secondary_y: false,
        };
        let json = serde_json::to_value(&series).unwrap();
        assert!(json["y"][0].is_null());
    }
}
