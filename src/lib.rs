//! `stormwatch` - Scheduled weather alert notifier
//!
//! This library implements a single-invocation pipeline: resolve a weather
//! API key from a managed secret store, fetch the current observation for a
//! fixed location, evaluate a small alert rule, and publish an SMS alert
//! through SNS when conditions warrant it.

pub mod config;
pub mod error;
pub mod evaluate;
pub mod handler;
pub mod models;
pub mod notify;
pub mod secrets;
pub mod weather;

// Re-export core types for public API
pub use config::{AlertConfig, WeatherConfig};
pub use error::AlertError;
pub use evaluate::should_alert;
pub use handler::{run, HandlerResponse};
pub use models::{AlertDecision, AlertReason, WeatherObservation};
pub use notify::{alert_message, Publisher, SnsPublisher};
pub use secrets::{resolve_api_key, AwsSecretStore, SecretStore};
pub use weather::{WeatherClient, WeatherSource};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, AlertError>;
