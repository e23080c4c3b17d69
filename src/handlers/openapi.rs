//! OpenAPI specification generation and app factory.

use crate::{
    config::{ForecastConfig, MetricsConfig, UpstreamClientConfig},
    handlers::{get_metrics, health, version, weather},
    middleware::{MetricsMiddleware, RequestIdMiddleware},
    services::{
        AppMetrics, ForecastClient, ForecastError, NwsClient, ShortForecastService,
        TemperatureClassifier, UpstreamMetrics,
    },
};
use actix_web::App;
use paperclip::actix::{OpenApiExt, web};
use paperclip::v2::models::{DefaultApiRaw, Info};
use std::sync::Arc;

/// Creates the shared OpenAPI specification for the API
pub fn create_openapi_spec() -> DefaultApiRaw {
    DefaultApiRaw {
        info: Info {
            title: "NWS Forecast API".into(),
            version: env!("CARGO_PKG_VERSION").into(),
            description: Some(
                "Short weather forecasts for a coordinate, backed by the National Weather Service API (api.weather.gov).\n\n\
                ## Forecast\n\
                `GET /api/weather?lat={lat}&lon={lon}` returns:\n\
                ```json\n\
                { \"shortForecast\": \"Partly Sunny\", \"tempCategory\": \"moderate\" }\n\
                ```\n\
                \n\
                `shortForecast` comes from the first forecast period starting on the current local day, or the\n\
                first period when none does. `tempCategory` classifies the first period's temperature as `cold`,\n\
                `moderate` or `hot`.\n\
                \n\
                **Configuration:**\n\
                - `NWS_USER_AGENT` (required): identification sent to api.weather.gov\n\
                - `COLD_LT_F` / `HOT_GE_F`: category thresholds in Fahrenheit (default 50 / 80)\n\
                - `FORECAST_TIMEZONE`: IANA zone used to decide \"today\" (default: host zone)\n\
                - `WEATHER_REQUEST_TIMEOUT_SECONDS`: upstream deadline per request (default 8)\n\
                \n\
                Every response carries an `X-Request-ID` header.".into()
            ),
            ..Default::default()
        },
        ..Default::default()
    }
}

/// Everything the handlers read from app data
#[derive(Clone)]
pub struct AppState {
    pub forecast: ShortForecastService,
    pub classifier: TemperatureClassifier,
    pub forecast_config: ForecastConfig,
    pub metrics_config: MetricsConfig,
    pub metrics: AppMetrics,
}

impl AppState {
    /// Wire the state around an existing forecast client
    pub fn new(
        client: Arc<dyn ForecastClient>,
        forecast_config: ForecastConfig,
        metrics: AppMetrics,
    ) -> Self {
        Self {
            forecast: ShortForecastService::new(client, forecast_config.zone),
            classifier: TemperatureClassifier::new(forecast_config.thresholds),
            forecast_config,
            metrics_config: MetricsConfig::default(),
            metrics,
        }
    }

    /// Build the production state from environment variables
    pub fn from_env() -> Result<Self, ForecastError> {
        let forecast_config = ForecastConfig::from_env()?;
        let metrics = AppMetrics::new()
            .map_err(|e| ForecastError::Configuration(format!("failed to create metrics: {e}")))?;
        let upstream_metrics = UpstreamMetrics::new(&metrics.registry).map_err(|e| {
            ForecastError::Configuration(format!("failed to create upstream metrics: {e}"))
        })?;

        let client = NwsClient::new(
            &forecast_config.user_agent,
            &forecast_config.base_url,
            UpstreamClientConfig::from_env(),
            Some(upstream_metrics),
        )?;

        let mut state = Self::new(Arc::new(client), forecast_config, metrics);
        state.metrics_config = MetricsConfig::from_env();
        Ok(state)
    }
}

/// Creates the application with all routes and middleware
///
/// Used by `main` and by the integration tests with a stubbed client.
pub fn create_app(
    state: AppState,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .wrap(RequestIdMiddleware)
        .wrap(MetricsMiddleware)
        .wrap_api_with_spec(create_openapi_spec())
        .app_data(web::Data::new(state.forecast))
        .app_data(web::Data::new(state.classifier))
        .app_data(web::Data::new(state.forecast_config))
        .app_data(web::Data::new(state.metrics_config))
        .app_data(web::Data::new(state.metrics))
        .service(web::resource("/api/health").route(web::get().to(health)))
        .service(web::resource("/api/version").route(web::get().to(version)))
        .service(web::resource("/api/weather").route(web::get().to(weather)))
        .service(web::resource("/api/metrics").route(web::get().to(get_metrics)))
        .with_json_spec_at("/api/spec/v2")
        .build()
}
