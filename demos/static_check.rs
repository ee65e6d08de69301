use std::convert::Infallible;

use clap::Parser;
use prometheus_metric_check::cli::CheckArgs;
use prometheus_metric_check::{
    run_check, CheckConfig, CheckSettings, MetricSource, QueryResponse, QueryResult, Runner,
};

// Usage: cargo run --example static_check --features clap -- -q up -w 10 -c 20 -p --value 15
//        PROMETHEUS_CRITICAL=@0:1 cargo run --example static_check --features clap -- --value 0.5

#[derive(Parser)]
struct Cli {
    #[command(flatten)]
    check: CheckArgs,

    /// The value the "backend" answers every query with
    #[arg(long, allow_hyphen_values = true)]
    value: f64,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

/// Stands in for a real Prometheus client.
struct StaticSource(f64);

impl MetricSource for StaticSource {
    type Error = Infallible;

    fn query(&self, config: &CheckConfig) -> Result<QueryResponse, Self::Error> {
        log::debug!("answering {:?} from {} with {}", config.query(), config.host(), self.0);
        Ok(QueryResponse::new(QueryResult::Scalar(self.0)))
    }
}

fn main() {
    let cli = Cli::parse();
    let settings = CheckSettings::from(cli.check);

    // stdout is reserved for the status line, RUST_LOG still overrides the level
    env_logger::Builder::new()
        .filter_level(settings.log_level(cli.verbose))
        .format_timestamp(None)
        .parse_default_env()
        .init();

    let source = StaticSource(cli.value);

    Runner::new()
        .safe_run(|| run_check(&settings, &source))
        .print_and_exit()
}
