//! The prometheus-metric-check crate evaluates a single metric value against Nagios style
//! threshold ranges and turns the result into a check plugin status.
//!
//! ```rust
//! # use prometheus_metric_check::{CheckConfig, CheckOutcome, CheckSettings, ServiceState};
//! let settings = CheckSettings::new("node_load1")
//!     .with_name("load")
//!     .with_thresholds("4", "8")
//!     .with_perfdata(true);
//! let config = CheckConfig::try_from(&settings).unwrap();
//!
//! let outcome = CheckOutcome::evaluate(&config, 5.0);
//! assert_eq!(outcome.state(), &ServiceState::Warning);
//! assert_eq!(
//!     &outcome.to_nagios_string(),
//!     "WARNING: load is 5.000000 which is out of 4 | load=5.000000"
//! );
//! ```

use std::fmt;

mod check;
#[cfg(feature = "clap")]
pub mod cli;
mod config;
mod range;
mod runner;

pub use crate::check::{
    execute, run_check, CheckError, CheckOutcome, MetricSource, QueryResponse, QueryResult, Sample,
};
pub use crate::config::{
    name_from_query, CheckConfig, CheckSettings, ConfigError, ThresholdKind, DEFAULT_HOST,
    DEFAULT_TIMEOUT,
};
pub use crate::range::{ParseRangeError, Range};
pub use crate::runner::{safe_run, Runner, RunnerResult};

/// Represents a service state from nagios.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ServiceState {
    Ok,
    Warning,
    Critical,
    Unknown,
}

impl ServiceState {
    /// Returns the corresponding nagios exit code to signal the service state of self.
    pub fn exit_code(&self) -> i32 {
        match self {
            ServiceState::Ok => 0,
            ServiceState::Warning => 1,
            ServiceState::Critical => 2,
            ServiceState::Unknown => 3,
        }
    }
}

impl fmt::Display for ServiceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ServiceState::Ok => "OK",
            ServiceState::Warning => "WARNING",
            ServiceState::Critical => "CRITICAL",
            ServiceState::Unknown => "UNKNOWN",
        };
        f.write_str(s)
    }
}

impl From<ThresholdKind> for ServiceState {
    fn from(kind: ThresholdKind) -> Self {
        match kind {
            ThresholdKind::Warning => ServiceState::Warning,
            ThresholdKind::Critical => ServiceState::Critical,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state() {
        assert_eq!(ServiceState::Ok.exit_code(), 0);
        assert_eq!(ServiceState::Warning.exit_code(), 1);
        assert_eq!(ServiceState::Critical.exit_code(), 2);
        assert_eq!(ServiceState::Unknown.exit_code(), 3);

        assert_eq!(&ServiceState::Ok.to_string(), "OK");
        assert_eq!(&ServiceState::Warning.to_string(), "WARNING");
        assert_eq!(&ServiceState::Critical.to_string(), "CRITICAL");
        assert_eq!(&ServiceState::Unknown.to_string(), "UNKNOWN");
    }

    #[test]
    fn test_state_from_threshold_kind() {
        assert_eq!(
            ServiceState::from(ThresholdKind::Warning),
            ServiceState::Warning
        );
        assert_eq!(
            ServiceState::from(ThresholdKind::Critical),
            ServiceState::Critical
        );
    }
}
