//! API response models for standard endpoints.

use paperclip::actix::Apiv2Schema;
use serde::{Deserialize, Serialize};

/// Response model for the health check endpoint
#[derive(Clone, Serialize, Deserialize, Apiv2Schema)]
pub struct HealthResponse {
    pub status: String,
}

/// Response model for the version information endpoint
#[derive(Clone, Serialize, Deserialize, Apiv2Schema)]
pub struct VersionResponse {
    pub version: String,
    pub commit: String,
    pub build_time: String,
}

/// Request query parameters for the weather endpoint
///
/// Both values are kept as raw strings so the handler can reject missing and
/// non-numeric input with the same 400 response.
#[derive(Clone, Default, Serialize, Deserialize, Apiv2Schema)]
pub struct WeatherQuery {
    /// Latitude in decimal degrees (e.g., "38.8894")
    pub lat: Option<String>,
    /// Longitude in decimal degrees (e.g., "-77.0352")
    pub lon: Option<String>,
}

/// Response model for the weather endpoint
#[derive(Clone, Debug, Serialize, Deserialize, Apiv2Schema)]
pub struct WeatherResponse {
    /// Short forecast text for today (e.g., "Partly Sunny")
    #[serde(rename = "shortForecast")]
    pub short_forecast: String,
    /// One of "cold", "moderate" or "hot"
    #[serde(rename = "tempCategory")]
    pub temp_category: String,
}
