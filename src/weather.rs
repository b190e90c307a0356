//! Weather API client for OpenWeatherMap current-conditions lookups
//!
//! One GET per invocation, imperial units. No retries: a scheduled task
//! that misses a run simply picks up the next one.

use crate::config::AlertConfig;
use crate::models::WeatherObservation;
use crate::AlertError;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

/// Seam over the weather provider, so the handler is testable offline
#[async_trait]
pub trait WeatherSource {
    /// Fetch the current observation for a location
    async fn current(&self, location: &str, api_key: &str)
        -> Result<WeatherObservation, AlertError>;
}

/// Weather API client for OpenWeatherMap
pub struct WeatherClient {
    /// HTTP client
    client: Client,
    /// Base URL, e.g. `https://api.openweathermap.org/data/2.5`
    base_url: String,
}

impl WeatherClient {
    /// Create a new weather API client
    pub fn new(config: &AlertConfig) -> Result<Self, AlertError> {
        let timeout = Duration::from_secs(config.weather.timeout_seconds.into());

        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("stormwatch/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| AlertError::unexpected(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.weather.base_url.clone(),
        })
    }
}

#[async_trait]
impl WeatherSource for WeatherClient {
    /// Get the current weather observation for a location.
    ///
    /// Single attempt; transport failures surface as `Network`, anything
    /// wrong with the body as `InvalidResponse`.
    #[instrument(skip(self, api_key), fields(location))]
    async fn current(
        &self,
        location: &str,
        api_key: &str,
    ) -> Result<WeatherObservation, AlertError> {
        info!("Fetching current weather for {}", location);

        let url = format!(
            "{}/weather?q={}&units=imperial&appid={}",
            self.base_url,
            urlencoding::encode(location),
            api_key
        );

        let response = self.client.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            warn!("Weather provider returned HTTP {}", status);
            return Err(AlertError::invalid_response(format!(
                "Weather provider returned HTTP {} for '{}'",
                status, location
            )));
        }

        let body: openweather::CurrentWeatherResponse = response.json().await.map_err(|e| {
            AlertError::invalid_response(format!("Failed to parse weather response: {e}"))
        })?;

        let observation = WeatherObservation::try_from(body)?;
        debug!(
            "Observation for {}: {} ({}), {}",
            location,
            observation.condition,
            observation.description,
            observation.format_temperature()
        );

        Ok(observation)
    }
}

/// OpenWeatherMap API response structures and conversion
mod openweather {
    use crate::models::WeatherObservation;
    use crate::AlertError;
    use chrono::DateTime;
    use serde::Deserialize;

    /// Current weather response from OpenWeatherMap
    #[derive(Debug, Deserialize)]
    pub struct CurrentWeatherResponse {
        #[serde(default)]
        pub weather: Vec<ConditionEntry>,
        pub main: Option<MainData>,
        /// Observation time, unix seconds
        pub dt: Option<i64>,
    }

    #[derive(Debug, Deserialize)]
    pub struct ConditionEntry {
        /// Condition category, e.g. "Rain"
        pub main: String,
        /// Condition text, e.g. "light rain"
        #[serde(default)]
        pub description: String,
    }

    #[derive(Debug, Deserialize)]
    pub struct MainData {
        /// Temperature in the requested units (imperial here)
        pub temp: Option<f64>,
    }

    impl TryFrom<CurrentWeatherResponse> for WeatherObservation {
        type Error = AlertError;

        fn try_from(response: CurrentWeatherResponse) -> Result<Self, Self::Error> {
            let condition = response
                .weather
                .first()
                .ok_or_else(|| AlertError::invalid_response("Response has no weather entries"))?;

            let temperature_f = response
                .main
                .as_ref()
                .and_then(|main| main.temp)
                .ok_or_else(|| AlertError::invalid_response("Response lacks main.temp"))?;

            let observed_at = response
                .dt
                .and_then(|seconds| DateTime::from_timestamp(seconds, 0));

            Ok(Self {
                condition: condition.main.clone(),
                description: condition.description.clone(),
                temperature_f,
                observed_at,
            })
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn converts_full_response() {
            let response: CurrentWeatherResponse = serde_json::from_str(
                r#"{
                    "weather": [{"main": "Rain", "description": "light rain"}],
                    "main": {"temp": 68.0, "humidity": 83},
                    "dt": 1700000000
                }"#,
            )
            .unwrap();

            let observation = WeatherObservation::try_from(response).unwrap();
            assert_eq!(observation.condition, "Rain");
            assert_eq!(observation.description, "light rain");
            assert_eq!(observation.temperature_f, 68.0);
            assert!(observation.observed_at.is_some());
        }

        #[test]
        fn empty_weather_array_is_invalid() {
            let response: CurrentWeatherResponse =
                serde_json::from_str(r#"{"weather": [], "main": {"temp": 50.0}}"#).unwrap();
            let err = WeatherObservation::try_from(response).unwrap_err();
            assert!(matches!(err, AlertError::InvalidResponse { .. }));
        }

        #[test]
        fn missing_temperature_is_invalid() {
            let response: CurrentWeatherResponse = serde_json::from_str(
                r#"{"weather": [{"main": "Clear", "description": "clear sky"}], "main": {}}"#,
            )
            .unwrap();
            let err = WeatherObservation::try_from(response).unwrap_err();
            assert!(matches!(err, AlertError::InvalidResponse { .. }));
            assert!(err.to_string().contains("main.temp"));
        }

        #[test]
        fn missing_main_block_is_invalid() {
            let response: CurrentWeatherResponse = serde_json::from_str(
                r#"{"weather": [{"main": "Clear", "description": "clear sky"}]}"#,
            )
            .unwrap();
            assert!(WeatherObservation::try_from(response).is_err());
        }

        #[test]
        fn missing_description_defaults_to_empty() {
            let response: CurrentWeatherResponse = serde_json::from_str(
                r#"{"weather": [{"main": "Clear"}], "main": {"temp": 75.0}}"#,
            )
            .unwrap();
            let observation = WeatherObservation::try_from(response).unwrap();
            assert_eq!(observation.description, "");
        }
    }
}
