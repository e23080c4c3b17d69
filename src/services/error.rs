//! Error taxonomy for forecast retrieval and selection.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use std::fmt;

/// Which of the two upstream calls failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpstreamStep {
    /// Coordinate to forecast-feed resolution
    Points,
    /// Forecast feed download
    Forecast,
}

impl UpstreamStep {
    pub fn as_str(&self) -> &'static str {
        match self {
            UpstreamStep::Points => "points",
            UpstreamStep::Forecast => "forecast",
        }
    }
}

impl fmt::Display for UpstreamStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors surfaced by the forecast client and services
#[derive(Debug, thiserror::Error)]
pub enum ForecastError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Upstream {step} request failed: {message}")]
    Upstream { step: UpstreamStep, message: String },

    #[error("Upstream returned no forecast periods")]
    NoData,

    #[error("Forecast deadline exceeded")]
    DeadlineExceeded,
}

impl ForecastError {
    pub(crate) fn upstream(step: UpstreamStep, message: impl Into<String>) -> Self {
        ForecastError::Upstream {
            step,
            message: message.into(),
        }
    }

    /// Get a user-friendly error message for API responses
    pub fn user_message(&self) -> String {
        match self {
            ForecastError::Configuration(_) => "Forecast service is not configured".to_string(),
            ForecastError::Upstream { step, .. } => {
                format!("Weather provider unavailable ({step} lookup failed)")
            }
            ForecastError::NoData => "Weather provider returned no forecast periods".to_string(),
            ForecastError::DeadlineExceeded => {
                "Weather provider did not respond in time".to_string()
            }
        }
    }
}

impl ResponseError for ForecastError {
    fn status_code(&self) -> StatusCode {
        match self {
            ForecastError::Configuration(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ForecastError::Upstream { .. } => StatusCode::BAD_GATEWAY,
            ForecastError::NoData => StatusCode::SERVICE_UNAVAILABLE,
            ForecastError::DeadlineExceeded => StatusCode::GATEWAY_TIMEOUT,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code())
            .content_type("text/plain; charset=utf-8")
            .body(self.user_message())
    }
}
