//! Upstream forecast client for the api.weather.gov two-step lookup.
//!
//! A forecast is resolved in two sequential calls that share one deadline:
//! - `GET {base}/points/{lat},{lon}` yields the gridpoint forecast feed URL
//! - `GET {forecast feed}` yields the ordered list of forecast periods
//!
//! Every call carries the configured `User-Agent` and asks for GeoJSON, the
//! representation that includes `properties.forecast` on the points resource.

use crate::{
    config::UpstreamClientConfig,
    models::ForecastPeriod,
    services::error::{ForecastError, UpstreamStep},
};
use async_trait::async_trait;
use prometheus::{CounterVec, HistogramOpts, HistogramVec, Opts, Registry};
use reqwest::{
    Client,
    header::{ACCEPT, HeaderValue, USER_AGENT},
};
use serde::{Deserialize, de::DeserializeOwned};
use std::time::Duration;
use tokio::time::Instant;
use tracing::{error, info, warn};

/// Production address of the National Weather Service API
pub const DEFAULT_BASE_URL: &str = "https://api.weather.gov";

const GEO_JSON: &str = "application/geo+json";

/// Source of forecast periods for a coordinate
#[async_trait]
pub trait ForecastClient: Send + Sync {
    /// Fetch the forecast periods for a coordinate, in upstream order.
    ///
    /// The whole exchange must finish before `deadline`.
    async fn forecast_periods(
        &self,
        lat: f64,
        lon: f64,
        deadline: Instant,
    ) -> Result<Vec<ForecastPeriod>, ForecastError>;
}

/// Metrics for upstream calls
#[derive(Clone)]
pub struct UpstreamMetrics {
    /// Upstream requests by step and outcome
    pub requests_total: CounterVec,

    /// Upstream request duration by step
    pub request_duration_seconds: HistogramVec,
}

impl UpstreamMetrics {
    /// Create and register the upstream metric families
    pub fn new(registry: &Registry) -> Result<Self, prometheus::Error> {
        let requests_total = CounterVec::new(
            Opts::new(
                "upstream_requests_total",
                "Total weather provider requests by step and outcome",
            ),
            &["step", "outcome"],
        )?;

        let request_duration_seconds = HistogramVec::new(
            HistogramOpts::new(
                "upstream_request_duration_seconds",
                "Duration of weather provider requests",
            )
            .buckets(vec![0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0]),
            &["step"],
        )?;

        registry.register(Box::new(requests_total.clone()))?;
        registry.register(Box::new(request_duration_seconds.clone()))?;

        Ok(Self {
            requests_total,
            request_duration_seconds,
        })
    }

    fn record(&self, step: UpstreamStep, outcome: &str, duration: Duration) {
        self.requests_total
            .with_label_values(&[step.as_str(), outcome])
            .inc();
        self.request_duration_seconds
            .with_label_values(&[step.as_str()])
            .observe(duration.as_secs_f64());
    }
}

#[derive(Debug, Default, Deserialize)]
struct PointsResponse {
    #[serde(default)]
    properties: PointsProperties,
}

#[derive(Debug, Default, Deserialize)]
struct PointsProperties {
    #[serde(default)]
    forecast: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct ForecastResponse {
    #[serde(default)]
    properties: ForecastProperties,
}

#[derive(Debug, Default, Deserialize)]
struct ForecastProperties {
    #[serde(default)]
    periods: Vec<RawPeriod>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawPeriod {
    #[serde(default)]
    name: String,
    #[serde(default)]
    start_time: String,
    temperature: f64,
    #[serde(default)]
    short_forecast: String,
}

impl From<RawPeriod> for ForecastPeriod {
    fn from(raw: RawPeriod) -> Self {
        ForecastPeriod {
            name: raw.name,
            short_forecast: raw.short_forecast,
            temperature: raw.temperature,
            start_time_iso: raw.start_time,
        }
    }
}

/// api.weather.gov client
///
/// Cheap to clone; the underlying connection pool is shared.
#[derive(Clone)]
pub struct NwsClient {
    client: Client,
    base_url: String,
    destination: String,
    user_agent: HeaderValue,
    config: UpstreamClientConfig,
    metrics: Option<UpstreamMetrics>,
}

impl NwsClient {
    /// Create a client for `base_url`, or the production API when it is empty
    ///
    /// Fails with [`ForecastError::Configuration`] when the user agent is
    /// empty or not a valid header value, or the base URL cannot be parsed.
    pub fn new(
        user_agent: &str,
        base_url: &str,
        config: UpstreamClientConfig,
        metrics: Option<UpstreamMetrics>,
    ) -> Result<Self, ForecastError> {
        if user_agent.trim().is_empty() {
            return Err(ForecastError::Configuration(
                "user agent is required by the weather.gov API".to_string(),
            ));
        }
        let user_agent = HeaderValue::from_str(user_agent).map_err(|e| {
            ForecastError::Configuration(format!("invalid user agent: {e}"))
        })?;

        let base_url = match base_url.trim() {
            "" => DEFAULT_BASE_URL,
            other => other.trim_end_matches('/'),
        };
        let destination = url::Url::parse(base_url)
            .map_err(|e| {
                ForecastError::Configuration(format!("invalid base URL '{base_url}': {e}"))
            })?
            .host_str()
            .unwrap_or("unknown")
            .to_string();

        let client = Client::builder()
            .timeout(Duration::from_secs(config.http_timeout_seconds))
            .connect_timeout(Duration::from_secs(config.connect_timeout_seconds))
            .build()
            .map_err(|e| {
                ForecastError::Configuration(format!("failed to build HTTP client: {e}"))
            })?;

        Ok(Self {
            client,
            base_url: base_url.to_string(),
            destination,
            user_agent,
            config,
            metrics,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn points_url(&self, lat: f64, lon: f64) -> String {
        format!("{}/points/{:.4},{:.4}", self.base_url, lat, lon)
    }

    /// Run one upstream call under the shared deadline, recording its outcome
    async fn get_json<T: DeserializeOwned>(
        &self,
        step: UpstreamStep,
        url: &str,
        deadline: Instant,
    ) -> Result<T, ForecastError> {
        if Instant::now() >= deadline {
            if self.config.enable_detailed_logging {
                warn!(
                    destination = %self.destination,
                    step = %step,
                    "Deadline already elapsed, skipping upstream call"
                );
            }
            return Err(ForecastError::DeadlineExceeded);
        }

        let start = std::time::Instant::now();
        let result = match tokio::time::timeout_at(deadline, self.fetch(step, url)).await {
            Ok(result) => result,
            Err(_) => Err(ForecastError::DeadlineExceeded),
        };
        let duration = start.elapsed();

        let outcome = match &result {
            Ok(_) => "success",
            Err(ForecastError::DeadlineExceeded) => "deadline_exceeded",
            Err(_) => "error",
        };
        if let Some(metrics) = &self.metrics {
            metrics.record(step, outcome, duration);
        }

        if self.config.enable_detailed_logging {
            match &result {
                Ok(_) => info!(
                    destination = %self.destination,
                    step = %step,
                    url = %url,
                    duration_ms = duration.as_millis(),
                    "Upstream request completed"
                ),
                Err(ForecastError::DeadlineExceeded) => warn!(
                    destination = %self.destination,
                    step = %step,
                    url = %url,
                    duration_ms = duration.as_millis(),
                    "Upstream request exceeded deadline"
                ),
                Err(e) => error!(
                    destination = %self.destination,
                    step = %step,
                    url = %url,
                    error = %e,
                    duration_ms = duration.as_millis(),
                    "Upstream request failed"
                ),
            }
        }

        result
    }

    async fn fetch<T: DeserializeOwned>(
        &self,
        step: UpstreamStep,
        url: &str,
    ) -> Result<T, ForecastError> {
        let response = self
            .client
            .get(url)
            .header(ACCEPT, GEO_JSON)
            .header(USER_AGENT, self.user_agent.clone())
            .send()
            .await
            .map_err(|e| ForecastError::upstream(step, format!("request to {url} failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ForecastError::upstream(
                step,
                format!("http {} for {url}", status.as_u16()),
            ));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| ForecastError::upstream(step, format!("invalid body from {url}: {e}")))
    }
}

#[async_trait]
impl ForecastClient for NwsClient {
    async fn forecast_periods(
        &self,
        lat: f64,
        lon: f64,
        deadline: Instant,
    ) -> Result<Vec<ForecastPeriod>, ForecastError> {
        let points_url = self.points_url(lat, lon);
        let points: PointsResponse = self
            .get_json(UpstreamStep::Points, &points_url, deadline)
            .await?;

        let forecast_url = points
            .properties
            .forecast
            .filter(|url| !url.trim().is_empty())
            .ok_or_else(|| {
                ForecastError::upstream(
                    UpstreamStep::Points,
                    format!("no forecast URL returned for {points_url}"),
                )
            })?;

        let forecast: ForecastResponse = self
            .get_json(UpstreamStep::Forecast, &forecast_url, deadline)
            .await?;

        Ok(forecast
            .properties
            .periods
            .into_iter()
            .map(ForecastPeriod::from)
            .collect())
    }
}
