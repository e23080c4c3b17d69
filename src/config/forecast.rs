//! Forecast service configuration.

use crate::services::{
    classifier::Thresholds, error::ForecastError, nws_client::DEFAULT_BASE_URL,
    short_forecast::LocalZone,
};
use std::env;

/// Upper bound for `WEATHER_REQUEST_TIMEOUT_SECONDS`
pub const MAX_REQUEST_TIMEOUT_SECONDS: u64 = 300;

/// Configuration for the forecast endpoint and its collaborators
#[derive(Clone, Debug)]
pub struct ForecastConfig {
    /// Identification string sent as `User-Agent` on every upstream call
    pub user_agent: String,
    pub base_url: String,
    pub thresholds: Thresholds,
    /// Zone used to decide which calendar day is "today"
    pub zone: LocalZone,
    /// Deadline for the whole upstream exchange of one request
    pub request_timeout_seconds: u64,
}

impl ForecastConfig {
    /// Build a configuration with defaults for everything but the user agent
    pub fn new(user_agent: impl Into<String>) -> Self {
        Self {
            user_agent: user_agent.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            thresholds: Thresholds::default(),
            zone: LocalZone::Host,
            request_timeout_seconds: 8,
        }
    }

    /// Load configuration from environment variables, falling back to defaults
    ///
    /// `NWS_USER_AGENT` is mandatory and an unknown `FORECAST_TIMEZONE` is
    /// rejected; malformed numbers fall back to their defaults.
    pub fn from_env() -> Result<Self, ForecastError> {
        let user_agent = env::var("NWS_USER_AGENT").unwrap_or_default();
        if user_agent.trim().is_empty() {
            return Err(ForecastError::Configuration(
                "NWS_USER_AGENT is required (e.g. 'forecast-api/1.0 (you@example.com)')"
                    .to_string(),
            ));
        }

        let base_url = env::var("NWS_BASE_URL")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let defaults = Thresholds::default();
        let cold_lt = env::var("COLD_LT_F")
            .ok()
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(defaults.cold_lt);

        let hot_ge = env::var("HOT_GE_F")
            .ok()
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(defaults.hot_ge);

        let zone = match env::var("FORECAST_TIMEZONE") {
            Ok(name) if !name.trim().is_empty() => LocalZone::from_name(name.trim())?,
            _ => LocalZone::Host,
        };

        let request_timeout_seconds = env::var("WEATHER_REQUEST_TIMEOUT_SECONDS")
            .ok()
            .and_then(|v| v.parse().ok())
            .filter(|secs: &u64| *secs > 0)
            .unwrap_or(8);
        if request_timeout_seconds > MAX_REQUEST_TIMEOUT_SECONDS {
            tracing::warn!(
                requested = request_timeout_seconds,
                max = MAX_REQUEST_TIMEOUT_SECONDS,
                "WEATHER_REQUEST_TIMEOUT_SECONDS is too large, clamping"
            );
        }
        let request_timeout_seconds = request_timeout_seconds.min(MAX_REQUEST_TIMEOUT_SECONDS);

        if cold_lt > hot_ge {
            tracing::warn!(
                cold_lt,
                hot_ge,
                "COLD_LT_F is above HOT_GE_F; temperatures in between will classify as cold"
            );
        }

        Ok(Self {
            user_agent,
            base_url,
            thresholds: Thresholds { cold_lt, hot_ge },
            zone,
            request_timeout_seconds,
        })
    }
}
