use actix_web::HttpServer;
use nws_forecast_api::{AppState, ServerConfig, create_app, telemetry};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let server_config = ServerConfig::from_env();
    if let Err(e) = telemetry::init_tracing(server_config.log_format) {
        eprintln!("failed to initialise logging: {e}");
    }

    let state = match AppState::from_env() {
        Ok(state) => state,
        Err(e) => {
            tracing::error!(error = %e, "Invalid configuration");
            return Err(std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string()));
        }
    };

    let thresholds = state.classifier.thresholds();
    tracing::info!(
        bind_addr = %server_config.bind_addr,
        base_url = %state.forecast_config.base_url,
        zone = ?state.forecast.zone(),
        cold_lt = thresholds.cold_lt,
        hot_ge = thresholds.hot_ge,
        timeout_seconds = state.forecast_config.request_timeout_seconds,
        "Starting forecast API"
    );

    HttpServer::new(move || create_app(state.clone()))
        .bind(&server_config.bind_addr)?
        .run()
        .await
}
