//! One-shot orchestration of the alert pipeline
//!
//! Resolve the API key, fetch the observation, decide, publish. Every
//! stage failure funnels into a single catch point here and becomes a
//! uniform 500 response; a clean run is always a 200.

use crate::config::AlertConfig;
use crate::models::AlertDecision;
use crate::notify::{alert_message, Publisher};
use crate::secrets::{resolve_api_key, SecretStore};
use crate::weather::WeatherSource;
use crate::AlertError;
use tracing::{debug, error, info, instrument};

/// Result record returned to the invocation trigger
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandlerResponse {
    pub status_code: u16,
    pub body: String,
}

impl HandlerResponse {
    fn ok<S: Into<String>>(body: S) -> Self {
        Self {
            status_code: 200,
            body: body.into(),
        }
    }
}

impl From<AlertError> for HandlerResponse {
    fn from(err: AlertError) -> Self {
        Self {
            status_code: err.status_code(),
            body: err.to_string(),
        }
    }
}

/// Run one alert invocation end to end.
///
/// Never returns an error: failures from any stage are converted into
/// the 500 response shape, since each invocation is independent and
/// there is nothing to unwind.
#[instrument(skip_all, fields(location = %config.location))]
pub async fn run(
    config: &AlertConfig,
    secrets: &impl SecretStore,
    weather: &impl WeatherSource,
    publisher: &impl Publisher,
) -> HandlerResponse {
    match try_run(config, secrets, weather, publisher).await {
        Ok(response) => response,
        Err(err) => {
            error!("Alert invocation failed: {}", err);
            HandlerResponse::from(err)
        }
    }
}

async fn try_run(
    config: &AlertConfig,
    secrets: &impl SecretStore,
    weather: &impl WeatherSource,
    publisher: &impl Publisher,
) -> Result<HandlerResponse, AlertError> {
    let api_key = resolve_api_key(secrets, &config.secret_id).await?;

    let observation = weather.current(&config.location, &api_key).await?;
    debug!("Weather observation: {:?}", observation);

    let decision = AlertDecision::for_observation(&observation, config.force_alert);
    if !decision.should_alert {
        info!("Conditions benign, no alert sent");
        return Ok(HandlerResponse::ok("No alert needed"));
    }

    info!("Alerting, reason: {:?}", decision.reason);
    let message = alert_message(&observation);
    publisher.publish(&config.topic_arn, &message).await?;

    Ok(HandlerResponse::ok("SMS alert sent"))
}
