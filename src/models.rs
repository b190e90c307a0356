use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single current-weather reading parsed from the provider's response
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct WeatherObservation {
    /// Condition category, e.g. "Rain" or "Clear"
    pub condition: String,
    /// Human-readable condition text, e.g. "light rain"
    pub description: String,
    /// Temperature in Fahrenheit (imperial units requested from the provider)
    pub temperature_f: f64,
    /// Provider-reported observation time, when present
    pub observed_at: Option<DateTime<Utc>>,
}

impl WeatherObservation {
    /// Format temperature with unit
    #[must_use]
    pub fn format_temperature(&self) -> String {
        format!("{}°F", self.temperature_f)
    }
}

/// Why an alert was (or would be) sent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertReason {
    /// Condition category matched a precipitation keyword
    Precipitation,
    /// Temperature below the cold threshold
    Cold,
    /// Temperature above the heat threshold
    Heat,
    /// The force-alert override was set
    Forced,
}

/// Outcome of evaluating one observation. Derived purely from the
/// observation (plus the override flag); consumed within the same run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlertDecision {
    pub should_alert: bool,
    pub reason: Option<AlertReason>,
}
