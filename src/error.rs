//! Error types and handling for the `stormwatch` alert task

use thiserror::Error;

/// Main error type for the `stormwatch` alert task
#[derive(Error, Debug)]
pub enum AlertError {
    /// The secret store denied access or the secret does not exist
    #[error("Secret unavailable: {message}")]
    SecretUnavailable { message: String },

    /// The secret payload is not valid JSON or lacks the expected field
    #[error("Malformed secret: {message}")]
    MalformedSecret { message: String },

    /// Transport-level failure talking to the weather provider
    #[error("Network error: {message}")]
    Network { message: String },

    /// The weather provider returned a body we cannot use
    #[error("Invalid weather response: {message}")]
    InvalidResponse { message: String },

    /// The notification publish call failed
    #[error("Publish error: {message}")]
    Publish { message: String },

    /// Catch-all for failures outside the named stages
    #[error("Unexpected error: {message}")]
    Unexpected { message: String },
}

impl AlertError {
    /// Create a new secret-unavailable error
    pub fn secret_unavailable<S: Into<String>>(message: S) -> Self {
        Self::SecretUnavailable {
            message: message.into(),
        }
    }

    /// Create a new malformed-secret error
    pub fn malformed_secret<S: Into<String>>(message: S) -> Self {
        Self::MalformedSecret {
            message: message.into(),
        }
    }

    /// Create a new network error
    pub fn network<S: Into<String>>(message: S) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    /// Create a new invalid-response error
    pub fn invalid_response<S: Into<String>>(message: S) -> Self {
        Self::InvalidResponse {
            message: message.into(),
        }
    }

    /// Create a new publish error
    pub fn publish<S: Into<String>>(message: S) -> Self {
        Self::Publish {
            message: message.into(),
        }
    }

    /// Create a new unexpected error
    pub fn unexpected<S: Into<String>>(message: S) -> Self {
        Self::Unexpected {
            message: message.into(),
        }
    }

    /// Status code reported for this error at the handler boundary
    #[must_use]
    pub fn status_code(&self) -> u16 {
        // Every stage failure maps to the same uniform response shape.
        500
    }
}

impl From<reqwest::Error> for AlertError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::invalid_response(err.to_string())
        } else {
            Self::network(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let secret_err = AlertError::secret_unavailable("access denied");
        assert!(matches!(secret_err, AlertError::SecretUnavailable { .. }));

        let network_err = AlertError::network("connection reset");
        assert!(matches!(network_err, AlertError::Network { .. }));

        let publish_err = AlertError::publish("topic rejected message");
        assert!(matches!(publish_err, AlertError::Publish { .. }));
    }

    #[test]
    fn test_display_contains_message() {
        let err = AlertError::malformed_secret("missing weatherApiKey");
        assert!(err.to_string().contains("missing weatherApiKey"));
        assert!(err.to_string().contains("Malformed secret"));
    }

    #[test]
    fn test_every_variant_is_500() {
        let errors = [
            AlertError::secret_unavailable("a"),
            AlertError::malformed_secret("b"),
            AlertError::network("c"),
            AlertError::invalid_response("d"),
            AlertError::publish("e"),
            AlertError::unexpected("f"),
        ];
        for err in errors {
            assert_eq!(err.status_code(), 500);
        }
    }
}
