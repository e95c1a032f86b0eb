//! Aggregation pipelines for the sales dashboard — daily trend, category
//! revenue, Pareto concentration, monthly heatmap, demographics, growth
//! consistency, summary metrics, key insights, and tabular export.
//!
//! Every pipeline is a pure function of the filtered record slice. Ratio
//! computations are deliberately unguarded: division by zero propagates
//! as non-finite values (rendered as `null` in JSON) rather than being
//! clamped, and downstream display tolerates them.

pub mod categories;
pub mod demographics;
pub mod export;
pub mod growth;
pub mod heatmap;
pub mod insights;
pub mod pareto;
pub mod summary;
pub mod trend;

pub use categories::CategoryRevenue;
pub use demographics::{AgeSpending, GenderBreakdown};
pub use export::{ExportPipeline, Table};
pub use growth::{GrowthConsistency, PricePoint};
pub use heatmap::HeatmapMatrix;
pub use insights::KeyInsights;
pub use pareto::{ConcentrationRisk, ParetoAnalysis, ParetoRow};
pub use summary::SummaryMetrics;
pub use trend::DailyRevenue;
