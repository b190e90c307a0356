//! Alert decision rule
//!
//! The only policy in the system lives here: two condition keywords and two
//! temperature thresholds. Everything else is orchestration.

use crate::models::{AlertDecision, AlertReason, WeatherObservation};

/// Condition keyword matched case-insensitively against the category
pub const RAIN_KEYWORD: &str = "rain";
/// Condition keyword matched case-insensitively against the category
pub const SNOW_KEYWORD: &str = "snow";
/// Alert when temperature drops strictly below this, in °F
pub const COLD_THRESHOLD_F: f64 = 32.0;
/// Alert when temperature rises strictly above this, in °F
pub const HEAT_THRESHOLD_F: f64 = 95.0;

/// Decide whether the observation warrants an alert.
///
/// Pure function of the observation. The rule is a disjunction: any
/// precipitation keyword in the condition category, or a temperature
/// outside the open interval (32, 95) °F. Exactly 32 °F and exactly
/// 95 °F do not trigger.
#[must_use]
pub fn should_alert(observation: &WeatherObservation) -> bool {
    let condition = observation.condition.to_lowercase();
    if condition.contains(RAIN_KEYWORD) || condition.contains(SNOW_KEYWORD) {
        return true;
    }
    if observation.temperature_f < COLD_THRESHOLD_F || observation.temperature_f > HEAT_THRESHOLD_F
    {
        return true;
    }
    false
}

impl AlertDecision {
    /// Evaluate an observation, recording which rule fired.
    ///
    /// `force` bypasses the rule entirely and is recorded as its own
    /// reason so a forced test alert is distinguishable in logs. The
    /// reason check order is fixed for stable output; the boolean
    /// outcome is order-independent.
    #[must_use]
    pub fn for_observation(observation: &WeatherObservation, force: bool) -> Self {
        if force {
            return Self {
                should_alert: true,
                reason: Some(AlertReason::Forced),
            };
        }

        let condition = observation.condition.to_lowercase();
        let reason = if condition.contains(RAIN_KEYWORD) || condition.contains(SNOW_KEYWORD) {
            Some(AlertReason::Precipitation)
        } else if observation.temperature_f < COLD_THRESHOLD_F {
            Some(AlertReason::Cold)
        } else if observation.temperature_f > HEAT_THRESHOLD_F {
            Some(AlertReason::Heat)
        } else {
            None
        };

        Self {
            should_alert: reason.is_some(),
            reason,
        }
    }
}
