//! Forecast domain types shared by the upstream client and the services.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One period of an upstream forecast feed.
///
/// `start_time_iso` is passed through exactly as the provider sent it and may
/// not be a valid timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastPeriod {
    /// Display label such as "Today" or "This Afternoon"
    pub name: String,
    pub short_forecast: String,
    /// Degrees Fahrenheit
    pub temperature: f64,
    pub start_time_iso: String,
}

/// Coarse temperature bucket returned alongside the forecast text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemperatureCategory {
    Cold,
    Moderate,
    Hot,
}

impl TemperatureCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            TemperatureCategory::Cold => "cold",
            TemperatureCategory::Moderate => "moderate",
            TemperatureCategory::Hot => "hot",
        }
    }
}

impl fmt::Display for TemperatureCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
