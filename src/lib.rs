//! NWS Forecast API - today's short forecast and a temperature category for
//! a coordinate, served over HTTP with Actix Web and Paperclip.
//!
//! A request is answered from two sequential calls to api.weather.gov
//! (points lookup, then the gridpoint forecast feed) bounded by one deadline.
//! The period starting on the current local day supplies the forecast text;
//! the first period's temperature is classified as cold, moderate or hot.
//!
//! ## Architecture
//!
//! - `models/` - Forecast domain types and request/response models
//! - `handlers/` - HTTP request handlers and the app factory
//! - `middleware/` - Request ID and metrics middleware
//! - `services/` - Upstream client, today-selection, classification, metrics
//! - `config/` - Configuration structures and environment loading
//! - `telemetry` - Tracing subscriber setup
//!
//! ## Quick Start
//!
//! ```no_run
//! use actix_web::HttpServer;
//! use nws_forecast_api::{create_app, AppState};
//!
//! #[actix_web::main]
//! async fn main() -> std::io::Result<()> {
//!     let state = AppState::from_env().expect("NWS_USER_AGENT must be set");
//!     HttpServer::new(move || create_app(state.clone()))
//!         .bind("127.0.0.1:8080")?
//!         .run()
//!         .await
//! }
//! ```

pub mod config;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod telemetry;

pub use config::{ForecastConfig, LogFormat, MetricsConfig, ServerConfig, UpstreamClientConfig};
pub use handlers::{
    AppState, create_app, create_openapi_spec, get_metrics, health, version, weather,
};
pub use middleware::{MetricsMiddleware, RequestId, RequestIdMiddleware};
pub use models::{
    ForecastPeriod, HealthResponse, TemperatureCategory, VersionResponse, WeatherQuery,
    WeatherResponse,
};
pub use services::{
    AppMetrics, Clock, FixedClock, ForecastClient, ForecastError, LocalZone, NwsClient,
    ShortForecastService, SystemClock, TemperatureClassifier, Thresholds, TodayOutlook,
    UpstreamMetrics, UpstreamStep, select_today,
};
