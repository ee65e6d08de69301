use std::fmt;

use crate::config::{CheckConfig, CheckSettings, ConfigError, ThresholdKind};
use crate::range::Range;
use crate::ServiceState;

/// Anything which can answer the configured query with a value, e.g. a Prometheus HTTP client.
///
/// Implementations should honour [CheckConfig::timeout] and must not cache results between runs.
pub trait MetricSource {
    type Error: std::error::Error + Send + Sync + 'static;

    fn query(&self, config: &CheckConfig) -> Result<QueryResponse, Self::Error>;
}

/// The answer of a [MetricSource] together with any warnings the backend attached.
#[derive(Clone, Debug, PartialEq)]
pub struct QueryResponse {
    pub result: QueryResult,
    pub warnings: Vec<String>,
}

impl QueryResponse {
    pub fn new(result: QueryResult) -> Self {
        QueryResponse {
            result,
            warnings: Vec::new(),
        }
    }

    pub fn with_warning(mut self, warning: &str) -> Self {
        self.warnings.push(warning.to_owned());
        self
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum QueryResult {
    Scalar(f64),
    Vector(Vec<Sample>),
    /// A range query result; only the number of series is kept.
    Matrix(usize),
    String(String),
}

impl QueryResult {
    pub fn kind(&self) -> &'static str {
        match self {
            QueryResult::Scalar(_) => "scalar",
            QueryResult::Vector(_) => "vector",
            QueryResult::Matrix(_) => "matrix",
            QueryResult::String(_) => "string",
        }
    }

    /// Picks the single value a check is evaluated against. For vectors this is the first sample.
    pub fn value(&self) -> Result<f64, CheckError> {
        match self {
            QueryResult::Scalar(value) => Ok(*value),
            QueryResult::Vector(samples) => samples
                .first()
                .map(|sample| sample.value)
                .ok_or(CheckError::EmptyVector),
            other => Err(CheckError::UnsupportedResult(other.kind())),
        }
    }
}

impl fmt::Display for QueryResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryResult::Scalar(value) => write!(f, "scalar: {}", value),
            QueryResult::Vector(samples) => {
                f.write_str("vector: [")?;
                for (i, sample) in samples.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{} => {}", sample.metric, sample.value)?;
                }
                f.write_str("]")
            }
            QueryResult::Matrix(series) => write!(f, "matrix: {} series", series),
            QueryResult::String(s) => write!(f, "string: {:?}", s),
        }
    }
}

/// One element of an instant vector. `metric` is the rendered label set, e.g. `up{job="node"}`.
#[derive(Clone, Debug, PartialEq)]
pub struct Sample {
    pub metric: String,
    pub value: f64,
}

impl Sample {
    pub fn new(metric: &str, value: f64) -> Self {
        Sample {
            metric: metric.to_owned(),
            value,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CheckError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("query error: {0}")]
    Query(#[source] Box<dyn std::error::Error + Send + Sync>),
    #[error("query returned an empty vector")]
    EmptyVector,
    #[error("unsupported type for query result: {0}")]
    UnsupportedResult(&'static str),
}

/// The result of a single check run: the determined state and everything needed to print it.
#[derive(Clone, Debug, PartialEq)]
pub struct CheckOutcome {
    state: ServiceState,
    name: String,
    value: f64,
    violated: Option<(ThresholdKind, Range)>,
    emit_perfdata: bool,
    query_debug: Option<String>,
}

impl CheckOutcome {
    /// Determines the state for `value`.
    ///
    /// NaN is decided by [CheckConfig::nan_is_ok] alone. Any other value is tested against the
    /// critical threshold first, then the warning threshold, and is OK if neither alerts.
    pub fn evaluate(config: &CheckConfig, value: f64) -> Self {
        let (state, violated) = if value.is_nan() {
            let state = if config.nan_is_ok() {
                ServiceState::Ok
            } else {
                ServiceState::Unknown
            };
            (state, None)
        } else {
            [ThresholdKind::Critical, ThresholdKind::Warning]
                .into_iter()
                .find_map(|kind| {
                    config
                        .threshold(kind)
                        .filter(|range| range.should_alert(value))
                        .map(|range| (ServiceState::from(kind), Some((kind, *range))))
                })
                .unwrap_or((ServiceState::Ok, None))
        };

        log::debug!("{} is {} => {}", config.name(), value, state);

        CheckOutcome {
            state,
            name: config.name().to_owned(),
            value,
            violated,
            emit_perfdata: config.emit_perfdata(),
            query_debug: None,
        }
    }

    pub fn state(&self) -> &ServiceState {
        &self.state
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The raw query result, only kept when [CheckConfig::debug_query] is set.
    pub fn query_debug(&self) -> Option<&str> {
        self.query_debug.as_deref()
    }

    /// The threshold which caused a WARNING or CRITICAL state.
    pub fn violated(&self) -> Option<(ThresholdKind, &Range)> {
        self.violated.as_ref().map(|(kind, range)| (*kind, range))
    }

    /// Returns the `name=value` perfdata of this outcome.
    pub fn perf_string(&self) -> String {
        // replace `=`
        let name = self.name.replace('=', "_");

        // quote `'`
        let name = name.replace('\'', "''");

        // quote if contains spaces
        let name = if name.contains(' ') {
            format!("'{}'", name)
        } else {
            name
        };

        format!("{}={}", name, format_value(self.value))
    }

    /// Returns a string which nagios understands to determine the service state.
    pub fn to_nagios_string(&self) -> String {
        let mut s = format!(
            "{}: {} is {}",
            self.state,
            self.name,
            format_value(self.value)
        );

        if let Some((_, range)) = &self.violated {
            s.push_str(&format!(" which is out of {}", range));
        }

        if self.emit_perfdata {
            s.push_str(&format!(" | {}", self.perf_string()));
        }

        s
    }

    pub fn exit_code(&self) -> i32 {
        self.state.exit_code()
    }

    /// Will print Self::to_nagios_string and exit with the exit code from Self::exit_code
    pub fn print_and_exit(&self) -> ! {
        println!("{}", self.to_nagios_string());
        std::process::exit(self.exit_code());
    }
}

/// Six decimals, with infinities spelled `+Inf`/`-Inf` as perfdata consumers expect.
fn format_value(value: f64) -> String {
    if value == f64::INFINITY {
        "+Inf".to_owned()
    } else if value == f64::NEG_INFINITY {
        "-Inf".to_owned()
    } else {
        format!("{:.6}", value)
    }
}

/// Queries `source` and evaluates the answer against the thresholds of `config`.
pub fn execute<S: MetricSource>(
    config: &CheckConfig,
    source: &S,
) -> Result<CheckOutcome, CheckError> {
    let response = source
        .query(config)
        .map_err(|err| CheckError::Query(Box::new(err)))?;

    for warning in &response.warnings {
        log::warn!("query warning: {}", warning);
    }

    let query_debug = format!("query result: {}", response.result);
    if config.debug_query() {
        log::info!("{}", query_debug);
    } else {
        log::debug!("{}", query_debug);
    }

    let value = response.result.value()?;
    let mut outcome = CheckOutcome::evaluate(config, value);
    if config.debug_query() {
        outcome.query_debug = Some(query_debug);
    }

    Ok(outcome)
}

/// Validates `settings` and runs the check. Invalid thresholds fail before `source` is queried.
pub fn run_check<S: MetricSource>(
    settings: &CheckSettings,
    source: &S,
) -> Result<CheckOutcome, CheckError> {
    let config = CheckConfig::try_from(settings)?;
    execute(&config, source)
}
