//! Severity levels and the per-run status accumulator.

use std::fmt;

use indexmap::IndexMap;

use crate::perfdata::PerfData;

/// Nagios plugin states, ordered from best to worst
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Severity {
    #[default]
    Ok = 0,
    Warning = 1,
    Critical = 2,
    Unknown = 3,
}

impl Severity {
    /// Process exit code for this state
    pub fn exit_code(self) -> i32 {
        self as i32
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Ok => "OK",
            Severity::Warning => "WARNING",
            Severity::Critical => "CRITICAL",
            Severity::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Accumulated outcome of every check in one plugin run.
///
/// Checks only ever raise the severity; the final value is the worst state
/// any check reported. Metrics keep the order in which their label was first
/// recorded.
#[derive(Debug, Clone, Default)]
pub struct CheckStatus {
    severity: Severity,
    messages: Vec<String>,
    metrics: IndexMap<String, PerfData>,
}

impl CheckStatus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message and raise the running severity to at least `severity`
    pub fn raise(&mut self, message: impl Into<String>, severity: Severity) {
        self.messages.push(message.into());
        self.severity = self.severity.max(severity);
    }

    /// Insert or replace the performance datum for `label`
    pub fn record_metric(&mut self, label: impl Into<String>, value: PerfData) {
        self.metrics.insert(label.into(), value);
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    pub fn metric(&self, label: &str) -> Option<&PerfData> {
        self.metrics.get(label)
    }

    pub fn metrics(&self) -> impl Iterator<Item = (&str, &PerfData)> {
        self.metrics.iter().map(|(label, value)| (label.as_str(), value))
    }

    pub fn exit_code(&self) -> i32 {
        self.severity.exit_code()
    }

    /// Render the single Nagios status line.
    ///
    /// `default_message` is used when nothing was raised above OK.
    pub fn status_line(&self, default_message: &str) -> String {
        let message = if self.severity == Severity::Ok || self.messages.is_empty() {
            default_message.to_string()
        } else {
            self.messages.join(" ")
        };

        let mut line = format!("{}: {}", self.severity, message);

        if !self.metrics.is_empty() {
            let perfdata = self
                .metrics
                .iter()
                .map(|(label, value)| format!("{label}={value}"))
                .collect::<Vec<_>>()
                .join(" ");
            line.push_str(" | ");
            line.push_str(&perfdata);
        }

        line
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_order() {
        assert!(Severity::Ok < Severity::Warning);
        assert!(Severity::Warning < Severity::Critical);
        assert!(Severity::Critical < Severity::Unknown);
        assert_eq!(Severity::Unknown.exit_code(), 3);
    }

    #[test]
    fn test_final_severity_is_worst_raised() {
        let sequences = [
            vec![Severity::Ok, Severity::Ok],
            vec![Severity::Warning, Severity::Ok],
            vec![Severity::Ok, Severity::Critical, Severity::Warning],
            vec![Severity::Unknown, Severity::Ok, Severity::Critical],
            vec![],
        ];

        for sequence in sequences {
            let mut status = CheckStatus::new();
            for severity in &sequence {
                status.raise("check", *severity);
            }

            let expected = sequence.iter().copied().max().unwrap_or(Severity::Ok);
            assert_eq!(status.severity(), expected);
            assert_eq!(status.exit_code(), expected as i32);
        }
    }

    #[test]
    fn test_status_line_default_message() {
        let status = CheckStatus::new();
        assert_eq!(status.status_line("all good"), "OK: all good");
    }

    #[test]
    fn test_status_line_ok_ignores_informational_messages() {
        let mut status = CheckStatus::new();
        status.raise("upgrade pending", Severity::Ok);
        status.record_metric("since_release", PerfData::new(600).unit("s"));

        assert_eq!(status.status_line("all good"), "OK: all good | since_release=600s");
    }

    #[test]
    fn test_status_line_joins_messages_and_metrics() {
        let mut status = CheckStatus::new();
        status.raise("node is syncing", Severity::Warning);
        status.raise("only 2 peers, expected at least 5", Severity::Critical);
        status.record_metric("peers", PerfData::new(2).min(0));
        status.record_metric("best_finalized_distance", PerfData::new(3));

        assert_eq!(
            status.status_line("unused"),
            "CRITICAL: node is syncing only 2 peers, expected at least 5 | peers=2;;;0 \
             best_finalized_distance=3"
        );
    }

    #[test]
    fn test_record_metric_last_write_wins_keeps_order() {
        let mut status = CheckStatus::new();
        status.record_metric("a", PerfData::new(1));
        status.record_metric("b", PerfData::new(2));
        status.record_metric("a", PerfData::new(3));

        let labels: Vec<_> = status.metrics().map(|(label, value)| format!("{label}={value}")).collect();
        assert_eq!(labels, vec!["a=3", "b=2"]);
    }
}
