//! Nagios performance data (`label=value[unit];warn;crit;min`).
//!
//! The optional `max` field is never emitted; none of the metrics has an
//! upper bound.

use std::fmt;

/// Value the poll loop reports when a block never increased
pub const INFINITE: &str = "infinite";

/// One performance datum, rendered without its label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PerfData {
    value: String,
    unit: Option<&'static str>,
    warn: Option<String>,
    crit: Option<String>,
    min: Option<String>,
}

impl PerfData {
    pub fn new(value: impl fmt::Display) -> Self {
        Self { value: value.to_string(), unit: None, warn: None, crit: None, min: None }
    }

    /// Duration in seconds, millisecond precision
    pub fn seconds(seconds: f64) -> Self {
        Self::new(format!("{seconds:.3}")).unit("s")
    }

    /// The literal `infinite` sentinel
    pub fn infinite() -> Self {
        Self::new(INFINITE)
    }

    pub fn unit(mut self, unit: &'static str) -> Self {
        self.unit = Some(unit);
        self
    }

    pub fn warn(mut self, warn: impl fmt::Display) -> Self {
        self.warn = Some(warn.to_string());
        self
    }

    pub fn crit(mut self, crit: impl fmt::Display) -> Self {
        self.crit = Some(crit.to_string());
        self
    }

    pub fn min(mut self, min: impl fmt::Display) -> Self {
        self.min = Some(min.to_string());
        self
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn is_infinite(&self) -> bool {
        self.value == INFINITE
    }
}

impl fmt::Display for PerfData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.value, self.unit.unwrap_or(""))?;

        let fields = [&self.warn, &self.crit, &self.min];
        let used = fields.iter().rposition(|field| field.is_some()).map_or(0, |index| index + 1);
        for field in &fields[..used] {
            write!(f, ";{}", field.as_deref().unwrap_or(""))?;
        }

        Ok(())
    }
}
