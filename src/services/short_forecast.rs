//! Picks the forecast period that represents "today" for a caller's zone.

use crate::{
    models::ForecastPeriod,
    services::{error::ForecastError, nws_client::ForecastClient},
};
use chrono::{DateTime, Local, NaiveDate, TimeZone, Utc};
use chrono_tz::Tz;
use std::sync::Arc;
use tokio::time::Instant;

/// Source of the current instant
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock pinned to a single instant
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Time zone in which calendar days are compared
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LocalZone {
    /// The host's local zone
    #[default]
    Host,
    /// An IANA zone such as `America/Chicago`
    Named(Tz),
}

impl LocalZone {
    pub fn from_name(name: &str) -> Result<Self, ForecastError> {
        name.parse::<Tz>()
            .map(LocalZone::Named)
            .map_err(|_| ForecastError::Configuration(format!("unknown time zone '{name}'")))
    }

    /// Calendar date of `instant` as observed in this zone
    pub fn local_date<T: TimeZone>(&self, instant: &DateTime<T>) -> NaiveDate {
        match self {
            LocalZone::Host => instant.with_timezone(&Local).date_naive(),
            LocalZone::Named(tz) => instant.with_timezone(tz).date_naive(),
        }
    }
}

/// Select the period representing today.
///
/// Returns the first period, in list order, whose start time falls on the
/// same local date as `now`. Periods with unparseable start times are
/// skipped. When nothing matches, the first period of the list is returned
/// whatever its start time; `None` only for an empty list.
pub fn select_today(
    periods: &[ForecastPeriod],
    now: DateTime<Utc>,
    zone: LocalZone,
) -> Option<&ForecastPeriod> {
    let today = zone.local_date(&now);

    periods
        .iter()
        .find(|period| {
            DateTime::parse_from_rfc3339(&period.start_time_iso)
                .map(|start| zone.local_date(&start) == today)
                .unwrap_or(false)
        })
        .or_else(|| periods.first())
}

/// Today's forecast text together with the temperature used for
/// classification
#[derive(Debug, Clone, PartialEq)]
pub struct TodayOutlook {
    pub short_forecast: String,
    /// Name of the period the forecast text came from
    pub period_name: String,
    /// Temperature of the first upstream period, in Fahrenheit
    pub temperature: f64,
}

/// Short forecast service over a [`ForecastClient`]
#[derive(Clone)]
pub struct ShortForecastService {
    client: Arc<dyn ForecastClient>,
    zone: LocalZone,
    clock: Arc<dyn Clock>,
}

impl ShortForecastService {
    pub fn new(client: Arc<dyn ForecastClient>, zone: LocalZone) -> Self {
        Self {
            client,
            zone,
            clock: Arc::new(SystemClock),
        }
    }

    /// Replace the wall clock, mainly for deterministic tests
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn zone(&self) -> LocalZone {
        self.zone
    }

    /// Short forecast text for today at a coordinate
    pub async fn short_forecast_for_today(
        &self,
        lat: f64,
        lon: f64,
        deadline: Instant,
    ) -> Result<String, ForecastError> {
        self.outlook_for_today(lat, lon, deadline)
            .await
            .map(|outlook| outlook.short_forecast)
    }

    /// Today's forecast text plus the first period's temperature, from a
    /// single upstream fetch
    pub async fn outlook_for_today(
        &self,
        lat: f64,
        lon: f64,
        deadline: Instant,
    ) -> Result<TodayOutlook, ForecastError> {
        let periods = self.client.forecast_periods(lat, lon, deadline).await?;
        let first = periods.first().ok_or(ForecastError::NoData)?;
        let selected = select_today(&periods, self.clock.now(), self.zone).unwrap_or(first);

        tracing::debug!(
            lat,
            lon,
            periods = periods.len(),
            selected = %selected.name,
            "Selected forecast period for today"
        );

        Ok(TodayOutlook {
            short_forecast: selected.short_forecast.clone(),
            period_name: selected.name.clone(),
            temperature: first.temperature,
        })
    }
}
