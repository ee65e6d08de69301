//! Command line and environment binding for [CheckSettings].
//!
//! Thresholds are taken as plain strings here and only parsed when the settings are turned into a
//! [CheckConfig](crate::CheckConfig), so an invalid range ends up as a check error instead of a
//! usage error from clap.

use std::time::Duration;

use crate::config::{CheckSettings, DEFAULT_HOST};

/// Arguments of a metric check. Flatten into your own parser with `#[command(flatten)]`.
#[derive(clap::Args, Clone, Debug)]
pub struct CheckArgs {
    /// Host URL to access Prometheus
    #[arg(short = 'H', long, env = "PROMETHEUS_HOST", default_value = DEFAULT_HOST)]
    pub host: String,

    /// PromQL query
    #[arg(short, long, env = "PROMETHEUS_QUERY", default_value = "")]
    pub query: String,

    /// Warning level
    #[arg(
        short,
        long,
        env = "PROMETHEUS_WARNING",
        default_value = "",
        allow_hyphen_values = true
    )]
    pub warning: String,

    /// Critical level
    #[arg(
        short,
        long,
        env = "PROMETHEUS_CRITICAL",
        default_value = "",
        allow_hyphen_values = true
    )]
    pub critical: String,

    /// Add perfdata to check output
    #[arg(short = 'p', long, env = "PROMETHEUS_EMIT_PERFDATA")]
    pub emit_perfdata: bool,

    /// Name
    #[arg(short, long, env = "PROMETHEUS_NAME", default_value = "")]
    pub name: String,

    /// Enable debug output for query
    #[arg(short = 'i', long, env = "PROMETHEUS_DEBUG_QUERY")]
    pub debug_query: bool,

    /// NaN result is ok
    #[arg(short = 'O', long, env = "PROMETHEUS_NAN_IS_OK")]
    pub nan_is_ok: bool,

    /// Query timeout in seconds
    #[arg(short, long, env = "PROMETHEUS_TIMEOUT", default_value_t = 10)]
    pub timeout: u64,
}

impl From<CheckArgs> for CheckSettings {
    fn from(args: CheckArgs) -> Self {
        CheckSettings {
            host: args.host,
            query: args.query,
            warning: args.warning,
            critical: args.critical,
            emit_perfdata: args.emit_perfdata,
            name: args.name,
            debug_query: args.debug_query,
            nan_is_ok: args.nan_is_ok,
            timeout: Duration::from_secs(args.timeout),
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;
    use crate::{CheckConfig, Range};

    #[derive(Parser)]
    struct Cli {
        #[command(flatten)]
        check: CheckArgs,
    }

    fn settings(args: &[&str]) -> CheckSettings {
        let args = std::iter::once("check").chain(args.iter().copied());
        let cli = Cli::try_parse_from(args).unwrap();
        cli.check.into()
    }

    #[test]
    fn test_defaults() {
        let settings = settings(&[]);
        assert_eq!(settings.host, "http://127.0.0.1:9090");
        assert_eq!(settings.query, "");
        assert_eq!(settings.timeout, Duration::from_secs(10));
        assert!(!settings.emit_perfdata);
    }

    #[test]
    fn test_short_flags() {
        let settings = settings(&[
            "-H", "http://prom:9090", "-q", "up", "-w", "10:", "-c", "@~:5", "-p", "-n", "foo",
            "-i", "-O", "-t", "3",
        ]);

        assert_eq!(settings.host, "http://prom:9090");
        assert_eq!(settings.query, "up");
        assert!(settings.emit_perfdata);
        assert!(settings.debug_query);
        assert!(settings.nan_is_ok);
        assert_eq!(settings.timeout, Duration::from_secs(3));

        let config = CheckConfig::try_from(&settings).unwrap();
        assert_eq!(config.name(), "foo");
        assert_eq!(
            config.critical(),
            Some(&Range::new(f64::NEG_INFINITY, 5.0, true))
        );
    }

    #[test]
    fn test_invalid_threshold_is_not_a_usage_error() {
        let settings = settings(&["--query", "up", "--warning", "abc"]);
        assert_eq!(settings.warning, "abc");
        assert!(CheckConfig::try_from(&settings).is_err());
    }

    #[test]
    fn test_negative_thresholds() {
        let settings = settings(&["-q", "up", "-w", "-10:10", "-c", "-20:20"]);
        let config = CheckConfig::try_from(&settings).unwrap();
        assert_eq!(config.warning(), Some(&Range::new(-10.0, 10.0, false)));
        assert_eq!(config.critical(), Some(&Range::new(-20.0, 20.0, false)));
    }
}
