//! Shared test doubles for the HTTP-level tests.

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use nws_forecast_api::{
    AppMetrics, AppState, ForecastClient, ForecastConfig, ForecastError, ForecastPeriod,
    UpstreamStep,
};
use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};
use std::time::Duration;
use tokio::time::Instant;

/// What the stub answers with
pub enum Behavior {
    Periods(Vec<ForecastPeriod>),
    UpstreamFailure,
    /// Sleeps for the given time, honouring the deadline
    Slow(Duration),
}

/// In-memory [`ForecastClient`] counting its invocations
pub struct StubClient {
    behavior: Behavior,
    calls: AtomicUsize,
}

impl StubClient {
    pub fn new(behavior: Behavior) -> Arc<Self> {
        Arc::new(Self {
            behavior,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ForecastClient for StubClient {
    async fn forecast_periods(
        &self,
        _lat: f64,
        _lon: f64,
        deadline: Instant,
    ) -> Result<Vec<ForecastPeriod>, ForecastError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.behavior {
            Behavior::Periods(periods) => Ok(periods.clone()),
            Behavior::UpstreamFailure => Err(ForecastError::Upstream {
                step: UpstreamStep::Points,
                message: "http 500 for /points".to_string(),
            }),
            Behavior::Slow(delay) => {
                tokio::time::timeout_at(deadline, tokio::time::sleep(*delay))
                    .await
                    .map_err(|_| ForecastError::DeadlineExceeded)?;
                Ok(vec![])
            }
        }
    }
}

pub fn period(name: &str, start: DateTime<Utc>, short: &str, temperature: f64) -> ForecastPeriod {
    ForecastPeriod {
        name: name.to_string(),
        short_forecast: short.to_string(),
        temperature,
        start_time_iso: start.to_rfc3339(),
    }
}

/// App state around a stub client with default thresholds and host zone
pub fn stub_state(behavior: Behavior) -> (AppState, Arc<StubClient>) {
    let client = StubClient::new(behavior);
    let config = ForecastConfig::new("test/1.0 (test@example.com)");
    let metrics = AppMetrics::new().expect("metrics registry");
    let state = AppState::new(client.clone(), config, metrics);
    (state, client)
}
