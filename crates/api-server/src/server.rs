//! API server — HTTP router, Swagger UI, and metrics exporter.

use crate::rest::{self, AppState};
use crate::swagger::ApiDoc;
use axum::routing::{get, post};
use axum::Router;
use pulse_core::config::AppConfig;
use pulse_dataset::store::DatasetStore;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// HTTP server exposing the dashboard API.
pub struct ApiServer {
    config: AppConfig,
    store: Arc<DatasetStore>,
}

impl ApiServer {
    pub fn new(config: AppConfig, store: Arc<DatasetStore>) -> Self {
        Self { config, store }
    }

    /// Start the HTTP server (blocks until shutdown).
    pub async fn start_http(&self) -> anyhow::Result<()> {
        let state = AppState {
            store: self.store.clone(),
            dashboard: self.config.dashboard.clone(),
            start_time: Instant::now(),
        };

        let app = Router::new()
            // Dashboard endpoints
            .route("/v1/dashboard", get(rest::handle_dashboard))
            .route("/v1/summary", get(rest::handle_summary))
            .route("/v1/categories", get(rest::handle_categories))
            .route("/v1/export/:pipeline", get(rest::handle_export))
            .route("/v1/refresh", post(rest::handle_refresh))
            // Operational endpoints
            .route("/health", get(rest::health_check))
            .route("/ready", get(rest::readiness))
            .route("/live", get(rest::liveness))
            // API docs
            .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
            // Middleware
            .layer(CompressionLayer::new())
            .layer(CorsLayer::permissive())
            .layer(TraceLayer::new_for_http())
            .with_state(state);

        let addr = SocketAddr::new(self.config.api.host.parse()?, self.config.api.http_port);

        info!(addr = %addr, "Starting HTTP server");

        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, app).await?;

        Ok(())
    }

    /// Start the Prometheus metrics exporter on its own port.
    pub async fn start_metrics(&self) -> anyhow::Result<()> {
        metrics_exporter_prometheus::PrometheusBuilder::new()
            .with_http_listener(SocketAddr::new(
                self.config.api.host.parse()?,
                self.config.metrics.port,
            ))
            .install()?;

        info!(port = self.config.metrics.port, "Metrics exporter started");
        Ok(())
    }
}
