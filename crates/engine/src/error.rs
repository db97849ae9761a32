use std::fmt;

#[derive(Debug)]
pub enum ConfigError {
    /// Fuzzy last-name threshold outside [0, 1].
    ThresholdOutOfRange(f64),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ThresholdOutOfRange(value) => {
                write!(f, "fuzzy threshold must be between 0.0 and 1.0, got {value}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}
