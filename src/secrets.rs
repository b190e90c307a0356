//! Credential resolution from AWS Secrets Manager
//!
//! The weather API key lives in a managed secret whose payload is a JSON
//! object with a `weatherApiKey` field. Resolved fresh on every invocation;
//! the task runs infrequently enough that caching buys nothing.

use crate::AlertError;
use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, instrument};

/// JSON field extracted from the secret payload
const API_KEY_FIELD: &str = "weatherApiKey";

/// Seam over the secret store, so the handler is testable without AWS
#[async_trait]
pub trait SecretStore {
    /// Fetch the raw string payload of a named secret
    async fn get_secret_string(&self, secret_id: &str) -> Result<String, AlertError>;
}

/// Secret store backed by AWS Secrets Manager
pub struct AwsSecretStore {
    client: aws_sdk_secretsmanager::Client,
}

impl AwsSecretStore {
    #[must_use]
    pub fn new(client: aws_sdk_secretsmanager::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl SecretStore for AwsSecretStore {
    async fn get_secret_string(&self, secret_id: &str) -> Result<String, AlertError> {
        let output = self
            .client
            .get_secret_value()
            .secret_id(secret_id)
            .send()
            .await
            .map_err(|e| {
                AlertError::secret_unavailable(format!(
                    "Failed to read secret '{}': {}",
                    secret_id,
                    aws_sdk_secretsmanager::error::DisplayErrorContext(&e)
                ))
            })?;

        output.secret_string().map(str::to_owned).ok_or_else(|| {
            AlertError::secret_unavailable(format!("Secret '{}' has no string payload", secret_id))
        })
    }
}

#[derive(Debug, Deserialize)]
struct SecretPayload {
    #[serde(rename = "weatherApiKey")]
    weather_api_key: Option<String>,
}

/// Resolve the weather API key from the named secret.
#[instrument(skip(store))]
pub async fn resolve_api_key(
    store: &impl SecretStore,
    secret_id: &str,
) -> Result<String, AlertError> {
    let raw = store.get_secret_string(secret_id).await?;
    debug!("Retrieved secret payload for '{}'", secret_id);

    let payload: SecretPayload = serde_json::from_str(&raw).map_err(|e| {
        AlertError::malformed_secret(format!("Secret '{}' is not valid JSON: {}", secret_id, e))
    })?;

    payload.weather_api_key.ok_or_else(|| {
        AlertError::malformed_secret(format!(
            "Secret '{}' lacks the '{}' field",
            secret_id, API_KEY_FIELD
        ))
    })
}
