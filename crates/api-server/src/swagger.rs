//! OpenAPI specification and Swagger UI configuration.

use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Sales Pulse API",
        version = "0.1.0",
        description = "Retail sales analytics dashboard.\n\nLoads a retail sales dataset, filters by date range and product category, and serves descriptive chart payloads plus derived summary metrics.",
        license(name = "MIT"),
    ),
    tags(
        (name = "Dashboard", description = "Filtered aggregation pipelines and chart payloads"),
        (name = "Export", description = "Tabular CSV/JSON export of pipeline results"),
        (name = "Operations", description = "Health, readiness, liveness, and dataset refresh"),
    ),
    paths(
        // Dashboard
        crate::rest::handle_dashboard,
        crate::rest::handle_summary,
        crate::rest::handle_categories,
        // Export
        crate::rest::handle_export,
        // Operations
        crate::rest::handle_refresh,
        crate::rest::health_check,
        crate::rest::readiness,
        crate::rest::liveness,
    ),
    components(schemas(
        // Payload types
        pulse_charts::payload::DashboardPayload,
        pulse_charts::payload::ParetoTiles,
        pulse_charts::figure::Figure,
        pulse_charts::figure::HeatmapFigure,
        pulse_charts::figure::Series,
        pulse_charts::figure::SeriesKind,
        pulse_charts::figure::Annotation,
        pulse_charts::figure::ThresholdLine,
        // Pipeline types
        pulse_analytics::summary::SummaryMetrics,
        pulse_analytics::insights::KeyInsights,
        pulse_analytics::insights::TopCategory,
        pulse_analytics::insights::MostConsistent,
        pulse_analytics::insights::HighestPricePoint,
        pulse_analytics::pareto::ConcentrationRisk,
        pulse_analytics::export::ExportPipeline,
        pulse_analytics::export::Table,
        // REST envelope types
        crate::rest::ExportFormat,
        crate::rest::ErrorResponse,
        crate::rest::HealthResponse,
        crate::rest::CategoriesResponse,
        crate::rest::RefreshResponse,
    ))
)]
pub struct ApiDoc;
