//! REST API handlers for the dashboard, export, and operational endpoints.

use axum::extract::{Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use chrono::NaiveDate;
use pulse_analytics::export::{self, ExportPipeline};
use pulse_analytics::summary::{self, SummaryMetrics};
use pulse_charts::payload::{self, DashboardPayload};
use pulse_core::config::DashboardConfig;
use pulse_dataset::loader::Dataset;
use pulse_dataset::store::DatasetStore;
use pulse_dataset::FilterQuery;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, warn};
use utoipa::{IntoParams, ToSchema};

/// Shared application state for REST handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<DatasetStore>,
    pub dashboard: DashboardConfig,
    pub start_time: Instant,
}

/// Filter parameters shared by the dashboard, summary, and export
/// endpoints.
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct DashboardParams {
    /// Inclusive range start (YYYY-MM-DD).
    pub start: Option<NaiveDate>,
    /// Inclusive range end (YYYY-MM-DD).
    pub end: Option<NaiveDate>,
    /// Comma-separated category list. Absent selects every category;
    /// an empty value selects none.
    pub categories: Option<String>,
    /// Attach chart annotations to the payload.
    #[serde(default)]
    pub annotations: bool,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct ExportParams {
    /// Inclusive range start (YYYY-MM-DD).
    pub start: Option<NaiveDate>,
    /// Inclusive range end (YYYY-MM-DD).
    pub end: Option<NaiveDate>,
    /// Comma-separated category list. Absent selects every category;
    /// an empty value selects none.
    pub categories: Option<String>,
    /// Export format; defaults to CSV.
    pub format: Option<ExportFormat>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Csv,
    Json,
}

/// Validate filter parameters at the API boundary.
fn parse_filter(
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
    categories: Option<&str>,
) -> Result<FilterQuery, &'static str> {
    if let (Some(start), Some(end)) = (start, end) {
        if start > end {
            return Err("'start' must not be after 'end'");
        }
    }

    let categories = categories.map(|raw| {
        raw.split(',')
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(String::from)
            .collect::<BTreeSet<String>>()
    });

    Ok(FilterQuery {
        start,
        end,
        categories,
    })
}

type RestError = (StatusCode, Json<ErrorResponse>);

fn bad_request(message: &str) -> RestError {
    metrics::counter!("api.validation_errors").increment(1);
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: "invalid_query".to_string(),
            message: message.to_string(),
        }),
    )
}

fn load_dataset(state: &AppState) -> Result<Arc<Dataset>, RestError> {
    state.store.get_or_load().map_err(|e| {
        error!(error = %e, "Dataset load failed");
        metrics::counter!("api.errors").increment(1);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: "dataset_unavailable".to_string(),
                message: "Failed to load dataset".to_string(),
            }),
        )
    })
}

/// GET /v1/dashboard — full dashboard payload for the given filters.
#[utoipa::path(
    get,
    path = "/v1/dashboard",
    tag = "Dashboard",
    params(DashboardParams),
    responses(
        (status = 200, description = "Dashboard payload", body = DashboardPayload),
        (status = 400, description = "Invalid filter parameters", body = ErrorResponse),
        (status = 500, description = "Dataset unavailable", body = ErrorResponse),
    )
)]
pub async fn handle_dashboard(
    State(state): State<AppState>,
    Query(params): Query<DashboardParams>,
) -> Result<Json<DashboardPayload>, RestError> {
    let filter = parse_filter(params.start, params.end, params.categories.as_deref())
        .map_err(|msg| {
            warn!(error = msg, "Dashboard query validation failed");
            bad_request(msg)
        })?;

    let dataset = load_dataset(&state)?;
    let rows = filter.apply(dataset.records());

    metrics::counter!("dashboard.requests").increment(1);
    Ok(Json(payload::build_dashboard(
        &rows,
        &state.dashboard,
        params.annotations,
    )))
}

/// GET /v1/summary — headline metrics only.
#[utoipa::path(
    get,
    path = "/v1/summary",
    tag = "Dashboard",
    params(DashboardParams),
    responses(
        (status = 200, description = "Summary metrics", body = SummaryMetrics),
        (status = 400, description = "Invalid filter parameters", body = ErrorResponse),
        (status = 500, description = "Dataset unavailable", body = ErrorResponse),
    )
)]
pub async fn handle_summary(
    State(state): State<AppState>,
    Query(params): Query<DashboardParams>,
) -> Result<Json<SummaryMetrics>, RestError> {
    let filter = parse_filter(params.start, params.end, params.categories.as_deref())
        .map_err(|msg| {
            warn!(error = msg, "Summary query validation failed");
            bad_request(msg)
        })?;

    let dataset = load_dataset(&state)?;
    let rows = filter.apply(dataset.records());
    Ok(Json(summary::summarize(&rows)))
}

/// GET /v1/categories — distinct categories and dataset date bounds,
/// for populating the filter pickers.
#[utoipa::path(
    get,
    path = "/v1/categories",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Available categories and date bounds", body = CategoriesResponse),
        (status = 500, description = "Dataset unavailable", body = ErrorResponse),
    )
)]
pub async fn handle_categories(
    State(state): State<AppState>,
) -> Result<Json<CategoriesResponse>, RestError> {
    let dataset = load_dataset(&state)?;
    let bounds = dataset.date_bounds();
    Ok(Json(CategoriesResponse {
        categories: dataset.categories(),
        date_min: bounds.map(|(min, _)| min),
        date_max: bounds.map(|(_, max)| max),
    }))
}

/// GET /v1/export/{pipeline} — one pipeline's result as CSV or JSON
/// records.
#[utoipa::path(
    get,
    path = "/v1/export/{pipeline}",
    tag = "Export",
    params(
        ("pipeline" = String, Path, description = "Pipeline name, e.g. daily_trend or pareto"),
        ExportParams,
    ),
    responses(
        (status = 200, description = "Exported table"),
        (status = 400, description = "Unknown pipeline or invalid filters", body = ErrorResponse),
        (status = 500, description = "Dataset unavailable", body = ErrorResponse),
    )
)]
pub async fn handle_export(
    State(state): State<AppState>,
    Path(pipeline): Path<String>,
    Query(params): Query<ExportParams>,
) -> Result<impl IntoResponse, RestError> {
    let pipeline: ExportPipeline = pipeline.parse().map_err(|_| {
        warn!(pipeline = %pipeline, "Unknown export pipeline requested");
        bad_request("unknown pipeline")
    })?;
    let filter = parse_filter(params.start, params.end, params.categories.as_deref())
        .map_err(|msg| {
            warn!(error = msg, "Export query validation failed");
            bad_request(msg)
        })?;

    let dataset = load_dataset(&state)?;
    let rows = filter.apply(dataset.records());
    let table = export::build_table(pipeline, &rows);

    metrics::counter!("dashboard.exports").increment(1);
    match params.format.unwrap_or(ExportFormat::Csv) {
        ExportFormat::Csv => Ok((
            [(header::CONTENT_TYPE, "text/csv; charset=utf-8")],
            table.to_csv(),
        )),
        ExportFormat::Json => {
            let body = table.to_json_records().map_err(|e| {
                error!(error = %e, "Export serialization failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorResponse {
                        error: "export_failed".to_string(),
                        message: "Internal serialization error".to_string(),
                    }),
                )
            })?;
            Ok(([(header::CONTENT_TYPE, "application/json")], body))
        }
    }
}

/// POST /v1/refresh — clear the cached dataset and reload from disk.
#[utoipa::path(
    post,
    path = "/v1/refresh",
    tag = "Operations",
    responses(
        (status = 200, description = "Dataset reloaded", body = RefreshResponse),
        (status = 500, description = "Reload failed", body = ErrorResponse),
    )
)]
pub async fn handle_refresh(
    State(state): State<AppState>,
) -> Result<Json<RefreshResponse>, RestError> {
    match state.store.reload() {
        Ok(dataset) => {
            metrics::counter!("dashboard.refreshes").increment(1);
            Ok(Json(RefreshResponse {
                rows: dataset.len() as u64,
            }))
        }
        Err(e) => {
            error!(error = %e, "Dataset reload failed");
            metrics::counter!("api.errors").increment(1);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "reload_failed".to_string(),
                    message: "Failed to reload dataset".to_string(),
                }),
            ))
        }
    }
}

/// GET /health — Health check endpoint.
#[utoipa::path(
    get,
    path = "/health",
    tag = "Operations",
    responses((status = 200, description = "Service health", body = HealthResponse))
)]
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        uptime_secs: state.start_time.elapsed().as_secs(),
        dataset_loaded: state.store.is_loaded(),
    })
}

/// GET /ready — Readiness probe. 200 only once the dataset is loaded.
#[utoipa::path(
    get,
    path = "/ready",
    tag = "Operations",
    responses(
        (status = 200, description = "Ready to serve"),
        (status = 503, description = "Dataset not loaded"),
    )
)]
pub async fn readiness(State(state): State<AppState>) -> StatusCode {
    if state.store.is_loaded() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    }
}

/// GET /live — Liveness probe.
#[utoipa::path(
    get,
    path = "/live",
    tag = "Operations",
    responses((status = 200, description = "Process alive"))
)]
pub async fn liveness() -> StatusCode {
    StatusCode::OK
}

#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub uptime_secs: u64,
    pub dataset_loaded: bool,
}

#[derive(Serialize, ToSchema)]
pub struct CategoriesResponse {
    pub categories: Vec<String>,
    pub date_min: Option<NaiveDate>,
    pub date_max: Option<NaiveDate>,
}

#[derive(Serialize, ToSchema)]
pub struct RefreshResponse {
    pub rows: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_filter_rejects_inverted_range() {
        let start = NaiveDate::from_ymd_opt(2023, 2, 1);
        let end = NaiveDate::from_ymd_opt(2023, 1, 1);
        assert!(parse_filter(start, end, None).is_err());
    }

    #[test]
    fn test_parse_filter_absent_categories_means_all() {
        let filter = parse_filter(None, None, None).unwrap();
        assert!(filter.categories.is_none());
    }

    #[test]
    fn test_parse_filter_empty_categories_selects_none() {
        let filter = parse_filter(None, None, Some("")).unwrap();
        assert_eq!(filter.categories.unwrap().len(), 0);
    }

    #[test]
    fn test_parse_filter_splits_and_trims() {
        let filter = parse_filter(None, None, Some("Beauty, Clothing,,")).unwrap();
        let categories = filter.categories.unwrap();
        assert_eq!(categories.len(), 2);
        assert!(categories.contains("Beauty"));
        assert!(categories.contains("Clothing"));
    }
}
