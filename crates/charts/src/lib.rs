//! Presentation layer — maps each aggregation result 1:1 to a
//! serializable chart figure and assembles the full dashboard payload.

pub mod builders;
pub mod figure;
pub mod payload;

pub use figure::{Annotation, Figure, HeatmapFigure, Series, SeriesKind, ThresholdLine};
pub use payload::{build_dashboard, DashboardPayload, ParetoTiles};
