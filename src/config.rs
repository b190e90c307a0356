//! Configuration management for the `stormwatch` alert task
//!
//! Handles loading configuration from files and environment variables,
//! and provides validation for all configuration settings.

use crate::AlertError;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure for the alert task
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertConfig {
    /// Location to fetch weather for, "City,CC" format
    #[serde(default = "default_location")]
    pub location: String,
    /// Identifier of the secret holding the weather API key
    #[serde(default = "default_secret_id")]
    pub secret_id: String,
    /// SNS topic ARN alerts are published to
    #[serde(default = "default_topic_arn")]
    pub topic_arn: String,
    /// Bypass the evaluator and always send an alert. Diagnostic
    /// affordance only; keep this off in deployed configuration.
    #[serde(default)]
    pub force_alert: bool,
    /// Weather API configuration
    #[serde(default)]
    pub weather: WeatherConfig,
}

/// Weather API configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// Base URL for the weather API
    #[serde(default = "default_weather_base_url")]
    pub base_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_weather_timeout")]
    pub timeout_seconds: u32,
}

// Default value functions
fn default_location() -> String {
    "Andhra Pradesh,IN".to_string()
}

fn default_secret_id() -> String {
    "WeatherNotifierSecrets".to_string()
}

fn default_topic_arn() -> String {
    "arn:aws:sns:us-east-1:934860271554:WeatherAlertsTopic".to_string()
}

fn default_weather_base_url() -> String {
    "https://api.openweathermap.org/data/2.5".to_string()
}

fn default_weather_timeout() -> u32 {
    30
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            base_url: default_weather_base_url(),
            timeout_seconds: default_weather_timeout(),
        }
    }
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self {
            location: default_location(),
            secret_id: default_secret_id(),
            topic_arn: default_topic_arn(),
            force_alert: false,
            weather: WeatherConfig::default(),
        }
    }
}

impl AlertConfig {
    /// Load configuration from file and environment variables
    pub fn load() -> Result<Self> {
        Self::load_from_path(None)
    }

    /// Load configuration from specified path
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        // Load from file if path is provided or use default location
        let config_file = config_path.unwrap_or_else(|| {
            Self::get_config_path().unwrap_or_else(|| PathBuf::from("config.toml"))
        });

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // Add environment variable overrides with STORMWATCH_ prefix
        builder = builder.add_source(
            Environment::with_prefix("STORMWATCH")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let mut config: AlertConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.apply_defaults();
        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("stormwatch").join("config.toml"))
    }

    /// Apply default values to missing configuration fields
    pub fn apply_defaults(&mut self) {
        if self.location.is_empty() {
            self.location = default_location();
        }
        if self.secret_id.is_empty() {
            self.secret_id = default_secret_id();
        }
        if self.topic_arn.is_empty() {
            self.topic_arn = default_topic_arn();
        }
        if self.weather.base_url.is_empty() {
            self.weather.base_url = default_weather_base_url();
        }
        if self.weather.timeout_seconds == 0 {
            self.weather.timeout_seconds = default_weather_timeout();
        }
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        if !self.location.contains(',') {
            return Err(AlertError::unexpected(format!(
                "Location '{}' must use \"City,CC\" format",
                self.location
            ))
            .into());
        }

        if !self.topic_arn.starts_with("arn:aws:sns:") {
            return Err(AlertError::unexpected(format!(
                "Topic ARN '{}' is not an SNS topic ARN",
                self.topic_arn
            ))
            .into());
        }

        if !self.weather.base_url.starts_with("http://")
            && !self.weather.base_url.starts_with("https://")
        {
            return Err(AlertError::unexpected(
                "Weather API base URL must be a valid HTTP or HTTPS URL",
            )
            .into());
        }

        if self.weather.timeout_seconds > 300 {
            return Err(
                AlertError::unexpected("Weather API timeout cannot exceed 300 seconds").into(),
            );
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AlertConfig::default();
        assert_eq!(config.location, "Andhra Pradesh,IN");
        assert_eq!(config.secret_id, "WeatherNotifierSecrets");
        assert!(config.topic_arn.contains("WeatherAlertsTopic"));
        assert_eq!(config.weather.base_url, "https://api.openweathermap.org/data/2.5");
        assert_eq!(config.weather.timeout_seconds, 30);
    }

    #[test]
    fn test_force_alert_defaults_off() {
        let config = AlertConfig::default();
        assert!(!config.force_alert);
    }

    #[test]
    fn test_default_config_validates() {
        let config = AlertConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_rejects_bare_location() {
        let mut config = AlertConfig::default();
        config.location = "Springfield".to_string();
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("City,CC"));
    }

    #[test]
    fn test_validation_rejects_non_sns_arn() {
        let mut config = AlertConfig::default();
        config.topic_arn = "arn:aws:sqs:us-east-1:1:queue".to_string();
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("SNS topic ARN"));
    }

    #[test]
    fn test_validation_rejects_bad_base_url() {
        let mut config = AlertConfig::default();
        config.weather.base_url = "ftp://weather.example".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_excessive_timeout() {
        let mut config = AlertConfig::default();
        config.weather.timeout_seconds = 500;
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("timeout cannot exceed"));
    }

    #[test]
    fn test_apply_defaults_fills_empty_fields() {
        let mut config = AlertConfig::default();
        config.location = String::new();
        config.weather.timeout_seconds = 0;
        config.apply_defaults();
        assert_eq!(config.location, "Andhra Pradesh,IN");
        assert_eq!(config.weather.timeout_seconds, 30);
    }

    #[test]
    fn test_config_path_generation() {
        let path = AlertConfig::get_config_path();
        assert!(path.is_some());
        let path = path.unwrap();
        assert!(path.to_string_lossy().contains("stormwatch"));
        assert!(path.to_string_lossy().contains("config.toml"));
    }
}
