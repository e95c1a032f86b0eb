use serde::Deserialize;

/// Root application configuration. Loaded from environment variables
/// with the prefix `SALES_PULSE__`.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub dataset: DatasetConfig,
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub metrics: MetricsConfig,
    #[serde(default)]
    pub dashboard: DashboardConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatasetConfig {
    #[serde(default = "default_dataset_path")]
    pub path: String,
    #[serde(default = "default_date_format")]
    pub date_format: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_http_port")]
    pub http_port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MetricsConfig {
    #[serde(default = "default_metrics_port")]
    pub port: u16,
}

/// Knobs for the aggregation pipelines and metric tiles.
#[derive(Debug, Clone, Deserialize)]
pub struct DashboardConfig {
    #[serde(default = "default_top_category_limit")]
    pub top_category_limit: usize,
    #[serde(default = "default_pareto_threshold")]
    pub pareto_threshold: f64,
    #[serde(default = "default_concentration_risk_threshold")]
    pub concentration_risk_threshold: f64,
}

// Default functions
fn default_dataset_path() -> String {
    "data/retail_sales_dataset.csv".to_string()
}
fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}
fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_http_port() -> u16 {
    8080
}
fn default_metrics_port() -> u16 {
    9091
}
fn default_top_category_limit() -> usize {
    8
}
fn default_pareto_threshold() -> f64 {
    0.8
}
fn default_concentration_risk_threshold() -> f64 {
    0.7
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            path: default_dataset_path(),
            date_format: default_date_format(),
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            http_port: default_http_port(),
        }
    }
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            port: default_metrics_port(),
        }
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            top_category_limit: default_top_category_limit(),
            pareto_threshold: default_pareto_threshold(),
            concentration_risk_threshold: default_concentration_risk_threshold(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            dataset: DatasetConfig::default(),
            api: ApiConfig::default(),
            metrics: MetricsConfig::default(),
            dashboard: DashboardConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, config::ConfigError> {
        let builder = config::Config::builder().add_source(
            config::Environment::with_prefix("SALES_PULSE")
                .separator("__")
                .try_parsing(true)
                .list_separator(","),
        );

        let config = builder.build()?;
        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.api.http_port, 8080);
        assert_eq!(config.dashboard.top_category_limit, 8);
        assert!((config.dashboard.pareto_threshold - 0.8).abs() < f64::EPSILON);
        assert_eq!(config.dataset.date_format, "%Y-%m-%d");
    }
}
