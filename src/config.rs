use std::fmt;
use std::time::Duration;

use crate::range::{ParseRangeError, Range};

pub const DEFAULT_HOST: &str = "http://127.0.0.1:9090";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Characters replaced with `_` when deriving a metric name from the query.
const NAME_REPLACED_CHARS: &[char] = &[
    '+', '-', '*', '/', '[', ']', '{', '}', '(', ')', '=', '.', ':', ';', '"', ' ', '\t',
];

/// Raw settings as they come from the command line or the environment. Nothing in here has been
/// validated yet, use [CheckConfig::try_from] to get something a check can run with.
#[derive(Clone, Debug)]
pub struct CheckSettings {
    pub host: String,
    pub query: String,
    pub warning: String,
    pub critical: String,
    pub emit_perfdata: bool,
    pub name: String,
    pub debug_query: bool,
    pub nan_is_ok: bool,
    pub timeout: Duration,
}

impl Default for CheckSettings {
    fn default() -> Self {
        CheckSettings {
            host: DEFAULT_HOST.to_owned(),
            query: String::new(),
            warning: String::new(),
            critical: String::new(),
            emit_perfdata: false,
            name: String::new(),
            debug_query: false,
            nan_is_ok: false,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl CheckSettings {
    pub fn new(query: &str) -> Self {
        CheckSettings {
            query: query.to_owned(),
            ..Default::default()
        }
    }

    pub fn with_host(mut self, host: &str) -> Self {
        self.host = host.to_owned();
        self
    }

    pub fn with_thresholds(mut self, warning: &str, critical: &str) -> Self {
        self.warning = warning.to_owned();
        self.critical = critical.to_owned();
        self
    }

    pub fn with_name(mut self, name: &str) -> Self {
        self.name = name.to_owned();
        self
    }

    pub fn with_perfdata(mut self, emit_perfdata: bool) -> Self {
        self.emit_perfdata = emit_perfdata;
        self
    }

    pub fn with_nan_is_ok(mut self, nan_is_ok: bool) -> Self {
        self.nan_is_ok = nan_is_ok;
        self
    }

    pub fn with_debug_query(mut self, debug_query: bool) -> Self {
        self.debug_query = debug_query;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// The log level a check binary should run with. Query debugging needs at least `Info`.
    pub fn log_level(&self, verbose: bool) -> log::LevelFilter {
        if verbose {
            log::LevelFilter::Debug
        } else if self.debug_query {
            log::LevelFilter::Info
        } else {
            log::LevelFilter::Warn
        }
    }
}

/// Which of the two thresholds a value or an error belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ThresholdKind {
    Warning,
    Critical,
}

impl fmt::Display for ThresholdKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ThresholdKind::Warning => f.write_str("warning"),
            ThresholdKind::Critical => f.write_str("critical"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid {kind} threshold: {source}")]
    InvalidThreshold {
        kind: ThresholdKind,
        #[source]
        source: ParseRangeError,
    },
}

/// The validated, immutable configuration of a single check run.
///
/// Built once from [CheckSettings] and then only handed out by reference.
#[derive(Clone, Debug, PartialEq)]
pub struct CheckConfig {
    host: String,
    query: String,
    warning: Option<Range>,
    critical: Option<Range>,
    emit_perfdata: bool,
    name: String,
    debug_query: bool,
    nan_is_ok: bool,
    timeout: Duration,
}

impl CheckConfig {
    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// `None` if no warning threshold was configured.
    pub fn warning(&self) -> Option<&Range> {
        self.warning.as_ref()
    }

    /// `None` if no critical threshold was configured.
    pub fn critical(&self) -> Option<&Range> {
        self.critical.as_ref()
    }

    pub fn threshold(&self, kind: ThresholdKind) -> Option<&Range> {
        match kind {
            ThresholdKind::Warning => self.warning(),
            ThresholdKind::Critical => self.critical(),
        }
    }

    pub fn emit_perfdata(&self) -> bool {
        self.emit_perfdata
    }

    /// The metric name used in the status line and in the perfdata.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn debug_query(&self) -> bool {
        self.debug_query
    }

    pub fn nan_is_ok(&self) -> bool {
        self.nan_is_ok
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl TryFrom<&CheckSettings> for CheckConfig {
    type Error = ConfigError;

    fn try_from(settings: &CheckSettings) -> Result<Self, Self::Error> {
        let warning = parse_threshold(&settings.warning, ThresholdKind::Warning)?;
        let critical = parse_threshold(&settings.critical, ThresholdKind::Critical)?;

        let name = if settings.name.is_empty() {
            name_from_query(&settings.query)
        } else {
            settings.name.clone()
        };

        log::debug!(
            "configured check {:?}: warning={:?} critical={:?}",
            name,
            warning,
            critical
        );

        Ok(CheckConfig {
            host: settings.host.clone(),
            query: settings.query.clone(),
            warning,
            critical,
            emit_perfdata: settings.emit_perfdata,
            name,
            debug_query: settings.debug_query,
            nan_is_ok: settings.nan_is_ok,
            timeout: settings.timeout,
        })
    }
}

impl TryFrom<CheckSettings> for CheckConfig {
    type Error = ConfigError;

    fn try_from(settings: CheckSettings) -> Result<Self, Self::Error> {
        CheckConfig::try_from(&settings)
    }
}

/// An unset threshold is an empty string and never alerts.
fn parse_threshold(s: &str, kind: ThresholdKind) -> Result<Option<Range>, ConfigError> {
    if s.trim().is_empty() {
        return Ok(None);
    }

    Range::parse(s)
        .map(Some)
        .map_err(|source| ConfigError::InvalidThreshold { kind, source })
}

/// Derives a metric name from a query, e.g. `up{job="node"}` becomes `query_up_job__node__`.
pub fn name_from_query(query: &str) -> String {
    format!("query_{}", query.replace(NAME_REPLACED_CHARS, "_"))
}
