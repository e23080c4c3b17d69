//! Weather endpoint integration tests.

mod common;

use actix_web::{http::StatusCode, test};
use chrono::{Duration, Utc};
use common::{Behavior, period, stub_state};
use nws_forecast_api::{WeatherQuery, WeatherResponse, create_app};

#[actix_web::test]
async fn test_weather_endpoint_invalid_params() {
    let uris = [
        "/api/weather",
        "/api/weather?lat=34.05",
        "/api/weather?lon=-118.25",
        "/api/weather?lat=&lon=-118.25",
        "/api/weather?lat=abc&lon=-118.25",
        "/api/weather?lat=34.05&lon=west",
        "/api/weather?lat=NaN&lon=0",
    ];

    for uri in uris {
        let (state, client) = stub_state(Behavior::Periods(vec![]));
        let app = test::init_service(create_app(state)).await;

        let req = test::TestRequest::get().uri(uri).to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "uri: {uri}");
        assert_eq!(client.calls(), 0, "upstream must not be called for {uri}");
    }
}

#[actix_web::test]
async fn test_weather_endpoint_success() {
    let now = Utc::now();
    let (state, client) = stub_state(Behavior::Periods(vec![
        period("Today", now, "Sunny", 70.0),
        period("Tonight", now + Duration::hours(12), "Clear", 48.0),
    ]));
    let app = test::init_service(create_app(state)).await;

    let req = test::TestRequest::get()
        .uri("/api/weather?lat=38.8894&lon=-77.0352")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let json: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(
        json,
        serde_json::json!({"shortForecast": "Sunny", "tempCategory": "moderate"})
    );
    assert_eq!(client.calls(), 1, "one upstream fetch per request");
}

#[actix_web::test]
async fn test_weather_category_uses_first_period_temperature() {
    let now = Utc::now();
    let (state, _client) = stub_state(Behavior::Periods(vec![
        period("Last Night", now - Duration::days(2), "Hazy", 85.0),
        period("Today", now, "Mostly Sunny", 60.0),
    ]));
    let app = test::init_service(create_app(state)).await;

    let req = test::TestRequest::get()
        .uri("/api/weather?lat=30&lon=-97")
        .to_request();
    let body: WeatherResponse =
        test::read_body_json(test::call_service(&app, req).await).await;

    assert_eq!(body.short_forecast, "Mostly Sunny");
    assert_eq!(body.temp_category, "hot");
}

#[actix_web::test]
async fn test_weather_falls_back_to_first_period() {
    let (state, _client) = stub_state(Behavior::Periods(vec![
        nws_forecast_api::ForecastPeriod {
            name: "Soon".to_string(),
            short_forecast: "Snow Likely".to_string(),
            temperature: 28.0,
            start_time_iso: "bad-timestamp".to_string(),
        },
        nws_forecast_api::ForecastPeriod {
            name: "Later".to_string(),
            short_forecast: "Cloudy".to_string(),
            temperature: 30.0,
            start_time_iso: "also-bad".to_string(),
        },
    ]));
    let app = test::init_service(create_app(state)).await;

    let req = test::TestRequest::get()
        .uri("/api/weather?lat=44.5&lon=-73.2")
        .to_request();
    let body: WeatherResponse =
        test::read_body_json(test::call_service(&app, req).await).await;

    assert_eq!(body.short_forecast, "Snow Likely");
    assert_eq!(body.temp_category, "cold");
}

#[actix_web::test]
async fn test_weather_upstream_failure_is_bad_gateway() {
    let (state, _client) = stub_state(Behavior::UpstreamFailure);
    let app = test::init_service(create_app(state)).await;

    let req = test::TestRequest::get()
        .uri("/api/weather?lat=38&lon=-77")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
    let body = test::read_body(resp).await;
    let body_str = std::str::from_utf8(&body).unwrap();
    assert!(body_str.contains("points"));
    assert!(!body_str.contains("http 500"), "internal detail leaked: {body_str}");
}

#[actix_web::test]
async fn test_weather_no_periods_is_distinct_from_upstream_failure() {
    let (state, _client) = stub_state(Behavior::Periods(vec![]));
    let app = test::init_service(create_app(state)).await;

    let req = test::TestRequest::get()
        .uri("/api/weather?lat=38&lon=-77")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[actix_web::test]
async fn test_weather_deadline_is_gateway_timeout() {
    let (mut state, _client) = stub_state(Behavior::Slow(std::time::Duration::from_secs(30)));
    state.forecast_config.request_timeout_seconds = 1;
    let app = test::init_service(create_app(state)).await;

    let req = test::TestRequest::get()
        .uri("/api/weather?lat=38&lon=-77")
        .to_request();
    let started = std::time::Instant::now();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::GATEWAY_TIMEOUT);
    assert!(started.elapsed() < std::time::Duration::from_secs(10));
}

#[actix_web::test]
async fn test_weather_huge_timeout_does_not_overflow_deadline() {
    let (mut state, client) =
        stub_state(Behavior::Periods(vec![period("Today", Utc::now(), "Sunny", 85.0)]));
    state.forecast_config.request_timeout_seconds = u64::MAX;
    let app = test::init_service(create_app(state)).await;

    let req = test::TestRequest::get()
        .uri("/api/weather?lat=38&lon=-77")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(client.calls(), 1);
}

#[actix_web::test]
async fn test_weather_query_serialization() {
    let query = WeatherQuery {
        lat: Some("34.05".to_string()),
        lon: Some("-118.25".to_string()),
    };

    let json = serde_json::to_string(&query).unwrap();
    let deserialized: WeatherQuery = serde_json::from_str(&json).unwrap();
    assert_eq!(deserialized.lat.as_deref(), Some("34.05"));
    assert_eq!(deserialized.lon.as_deref(), Some("-118.25"));
}

#[actix_web::test]
async fn test_weather_response_field_names() {
    let response = WeatherResponse {
        short_forecast: "Chance Showers".to_string(),
        temp_category: "moderate".to_string(),
    };

    let json = serde_json::to_value(&response).unwrap();
    assert_eq!(json["shortForecast"], "Chance Showers");
    assert_eq!(json["tempCategory"], "moderate");
}
