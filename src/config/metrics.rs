//! Metrics configuration.

use std::env;

/// Configuration for application metrics collection
#[derive(Clone, Debug)]
pub struct MetricsConfig {
    /// Serve `/api/metrics`; collection itself always runs
    pub enabled: bool,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

impl MetricsConfig {
    /// Load configuration from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        let enabled = env::var("METRICS_ENABLED")
            .map(|v| !matches!(v.trim().to_ascii_lowercase().as_str(), "false" | "0" | "off"))
            .unwrap_or(true);

        Self { enabled }
    }
}
