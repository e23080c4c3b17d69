//! Temperature classification into cold / moderate / hot buckets.

use crate::models::TemperatureCategory;

/// Classification boundaries in degrees Fahrenheit
///
/// `cold_lt` is exclusive (a reading equal to it is not cold) while `hot_ge`
/// is inclusive. Sensible results assume `cold_lt <= hot_ge`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    pub cold_lt: f64,
    pub hot_ge: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            cold_lt: 50.0,
            hot_ge: 80.0,
        }
    }
}

/// Stateless classifier, fixed at construction
#[derive(Debug, Clone, Copy, Default)]
pub struct TemperatureClassifier {
    thresholds: Thresholds,
}

impl TemperatureClassifier {
    pub fn new(thresholds: Thresholds) -> Self {
        Self { thresholds }
    }

    pub fn thresholds(&self) -> Thresholds {
        self.thresholds
    }

    /// Map a Fahrenheit reading to its category
    pub fn classify(&self, temp_f: f64) -> TemperatureCategory {
        if temp_f < self.thresholds.cold_lt {
            return TemperatureCategory::Cold;
        }
        if temp_f >= self.thresholds.hot_ge {
            return TemperatureCategory::Hot;
        }
        TemperatureCategory::Moderate
    }
}
