//! Weather endpoint handler.

use crate::{
    config::{ForecastConfig, MAX_REQUEST_TIMEOUT_SECONDS},
    middleware::RequestId,
    models::{WeatherQuery, WeatherResponse},
    services::{AppMetrics, ShortForecastService, TemperatureClassifier},
};
use actix_web::{Error, HttpMessage, HttpRequest, Result, web};
use paperclip::actix::api_v2_operation;
use std::time::Duration;
use tokio::time::Instant;

/// Deadline applied when no [`ForecastConfig`] is registered
const DEFAULT_REQUEST_TIMEOUT_SECONDS: u64 = 8;

/// Weather endpoint
///
/// Returns today's short forecast and a temperature category for a
/// coordinate. Upstream failures map to 502, an empty forecast to 503 and a
/// missed deadline to 504.
#[api_v2_operation(
    summary = "Weather Forecast Endpoint",
    description = "Returns today's short forecast text and a temperature category (cold, moderate or hot) for the given latitude/longitude (e.g., ?lat=38.8894&lon=-77.0352). Responds 400 for missing or non-numeric coordinates, 502 when the weather provider fails, 503 when it returns no periods and 504 when it does not answer in time.",
    tags("Weather")
)]
pub async fn weather(
    req: HttpRequest,
    query: web::Query<WeatherQuery>,
) -> Result<web::Json<WeatherResponse>, Error> {
    let (Some(lat), Some(lon)) = (
        parse_coordinate(query.lat.as_deref()),
        parse_coordinate(query.lon.as_deref()),
    ) else {
        return Err(actix_web::error::ErrorBadRequest(
            "invalid or missing lat/lon",
        ));
    };

    let Some(forecast) = req.app_data::<web::Data<ShortForecastService>>() else {
        tracing::error!("ShortForecastService is not registered as app data");
        return Err(actix_web::error::ErrorInternalServerError(
            "Forecast service not configured",
        ));
    };

    let classifier = req
        .app_data::<web::Data<TemperatureClassifier>>()
        .map(|c| *c.get_ref())
        .unwrap_or_default();

    let timeout_seconds = req
        .app_data::<web::Data<ForecastConfig>>()
        .map(|c| c.request_timeout_seconds)
        .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECONDS)
        .min(MAX_REQUEST_TIMEOUT_SECONDS);
    let now = Instant::now();
    let deadline = now
        .checked_add(Duration::from_secs(timeout_seconds))
        .unwrap_or(now);

    let request_id = req
        .extensions()
        .get::<RequestId>()
        .map(|id| id.to_string())
        .unwrap_or_default();

    let outlook = forecast
        .outlook_for_today(lat, lon, deadline)
        .await
        .map_err(|e| {
            tracing::error!(
                request_id = %request_id,
                lat,
                lon,
                error = %e,
                "Forecast lookup failed"
            );
            e
        })?;

    let category = classifier.classify(outlook.temperature);
    if let Some(metrics) = req.app_data::<web::Data<AppMetrics>>() {
        metrics.record_category(category);
    }

    tracing::debug!(
        request_id = %request_id,
        period = %outlook.period_name,
        temperature = outlook.temperature,
        category = %category,
        "Returning forecast"
    );

    Ok(web::Json(WeatherResponse {
        short_forecast: outlook.short_forecast,
        temp_category: category.as_str().to_string(),
    }))
}

/// Parse a coordinate query value; missing, blank, non-numeric and
/// non-finite values all yield `None`
fn parse_coordinate(raw: Option<&str>) -> Option<f64> {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .and_then(|s| s.parse::<f64>().ok())
        .filter(|v| v.is_finite())
}
