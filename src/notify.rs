//! Alert publishing through AWS SNS
//!
//! One fixed topic, one plain-text message, no batching and no retry. The
//! synchronous publish result is the only delivery signal we consume.

use crate::models::WeatherObservation;
use crate::AlertError;
use async_trait::async_trait;
use tracing::{info, instrument};

/// Seam over the publish service, so the handler is testable without AWS
#[async_trait]
pub trait Publisher {
    /// Publish a plain-text message to the destination topic
    async fn publish(&self, topic_arn: &str, message: &str) -> Result<(), AlertError>;
}

/// Publisher backed by AWS SNS
pub struct SnsPublisher {
    client: aws_sdk_sns::Client,
}

impl SnsPublisher {
    #[must_use]
    pub fn new(client: aws_sdk_sns::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Publisher for SnsPublisher {
    #[instrument(skip(self, message))]
    async fn publish(&self, topic_arn: &str, message: &str) -> Result<(), AlertError> {
        let output = self
            .client
            .publish()
            .topic_arn(topic_arn)
            .message(message)
            .send()
            .await
            .map_err(|e| {
                AlertError::publish(format!(
                    "Failed to publish to '{}': {}",
                    topic_arn,
                    aws_sdk_sns::error::DisplayErrorContext(&e)
                ))
            })?;

        info!(
            "Published alert to {} (message id {:?})",
            topic_arn,
            output.message_id()
        );
        Ok(())
    }
}

/// Format the alert text sent to subscribers.
#[must_use]
pub fn alert_message(observation: &WeatherObservation) -> String {
    format!(
        "Weather Alert!\nCondition: {}\nTemperature: {}",
        observation.description,
        observation.format_temperature()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_contains_description_and_temperature() {
        let observation = WeatherObservation {
            condition: "Rain".to_string(),
            description: "light rain".to_string(),
            temperature_f: 68.0,
            observed_at: None,
        };
        let message = alert_message(&observation);
        assert!(message.contains("Weather Alert!"));
        assert!(message.contains("light rain"));
        assert!(message.contains("68"));
        assert!(message.contains("°F"));
    }

    #[test]
    fn message_keeps_fractional_temperature() {
        let observation = WeatherObservation {
            condition: "Clear".to_string(),
            description: "clear sky".to_string(),
            temperature_f: 31.5,
            observed_at: None,
        };
        assert!(alert_message(&observation).contains("31.5°F"));
    }
}
