use serde::Deserialize;

use crate::error::ConfigError;

/// Default last-name similarity threshold for the fuzzy stage.
pub const DEFAULT_LASTNAME_THRESHOLD: f64 = 0.85;

/// First-name similarity threshold for the fuzzy stage. Fixed, not exposed
/// for tuning; the asymmetry with the configurable last-name threshold is
/// deliberate policy.
pub const FIRSTNAME_THRESHOLD: f64 = 0.80;

/// Engine tuning. The only tunable is the fuzzy last-name threshold.
#[derive(Debug, Clone, Deserialize)]
pub struct MatchConfig {
    #[serde(default = "default_lastname_threshold")]
    pub lastname_threshold: f64,
}

fn default_lastname_threshold() -> f64 {
    DEFAULT_LASTNAME_THRESHOLD
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self { lastname_threshold: DEFAULT_LASTNAME_THRESHOLD }
    }
}

impl MatchConfig {
    pub fn with_lastname_threshold(lastname_threshold: f64) -> Self {
        Self { lastname_threshold }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.lastname_threshold) {
            return Err(ConfigError::ThresholdOutOfRange(self.lastname_threshold));
        }
        Ok(())
    }
}
