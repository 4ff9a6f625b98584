//! Warning/critical threshold pairs.

use crate::error::ConfigError;
use crate::status::Severity;

/// An upper-bound threshold pair with `warn <= crit`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Thresholds {
    warn: u64,
    crit: u64,
}

impl Thresholds {
    /// Validate and build a threshold pair; `name` identifies the option in errors
    pub fn new(name: &'static str, warn: u64, crit: u64) -> Result<Self, ConfigError> {
        if warn > crit {
            return Err(ConfigError::Thresholds { name, warn, crit });
        }
        Ok(Self { warn, crit })
    }

    pub fn warn(&self) -> u64 {
        self.warn
    }

    pub fn crit(&self) -> u64 {
        self.crit
    }

    /// Classify a measured value: at or above `crit` is CRITICAL, at or above `warn` is WARNING
    pub fn classify(&self, value: u64) -> Severity {
        if value >= self.crit {
            Severity::Critical
        } else if value >= self.warn {
            Severity::Warning
        } else {
            Severity::Ok
        }
    }
}
