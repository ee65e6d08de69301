use std::fmt::Display;

use crate::{CheckOutcome, ServiceState};

/// Turns the result of a check into a service state. Errors exit with [ServiceState::Unknown]
/// unless a different handler is given via [Runner::on_error].
///
/// ```rust,no_run
/// # use prometheus_metric_check::{CheckError, CheckOutcome, Runner, ServiceState};
/// # fn do_check() -> Result<CheckOutcome, CheckError> { Err(CheckError::EmptyVector) }
/// Runner::new()
///     .on_error(|e| (ServiceState::Critical, e))
///     .safe_run(do_check)
///     .print_and_exit()
/// ```
pub struct Runner<E> {
    on_error: Option<Box<dyn FnOnce(E) -> (ServiceState, E)>>,
}

impl<E: Display> Runner<E> {
    pub fn new() -> Self {
        Self { on_error: None }
    }

    pub fn on_error(mut self, f: impl FnOnce(E) -> (ServiceState, E) + 'static) -> Self {
        self.on_error = Some(Box::new(f));
        self
    }

    /// This will run either the default `on_error` handler or the one specified by calling
    /// [Runner::on_error]. It will use the given ([ServiceState], message) tuple on error.
    pub fn safe_run(self, f: impl FnOnce() -> Result<CheckOutcome, E>) -> RunnerResult<E> {
        match f() {
            Ok(outcome) => RunnerResult::Ok(outcome),
            Err(err) => {
                let (state, err) = match self.on_error {
                    Some(on_error) => on_error(err),
                    None => (ServiceState::Unknown, err),
                };

                log::error!("check failed: {}", err);
                RunnerResult::Err(state, err)
            }
        }
    }
}

impl<E: Display> Default for Runner<E> {
    fn default() -> Self {
        Self::new()
    }
}

/// Shorthand for a [Runner] which exits with `error_state` on error.
pub fn safe_run<E: Display>(
    f: impl FnOnce() -> Result<CheckOutcome, E>,
    error_state: ServiceState,
) -> RunnerResult<E> {
    Runner::new()
        .on_error(move |e| (error_state, e))
        .safe_run(f)
}

pub enum RunnerResult<E> {
    Ok(CheckOutcome),
    Err(ServiceState, E),
}

impl<E: Display> RunnerResult<E> {
    pub fn state(&self) -> ServiceState {
        match self {
            RunnerResult::Ok(outcome) => *outcome.state(),
            RunnerResult::Err(state, _) => *state,
        }
    }

    /// The single status line a check prints on stdout.
    pub fn to_nagios_string(&self) -> String {
        match self {
            RunnerResult::Ok(outcome) => outcome.to_nagios_string(),
            RunnerResult::Err(state, err) => format!("{}: {}", state, err),
        }
    }

    pub fn print_and_exit(self) -> ! {
        println!("{}", self.to_nagios_string());
        std::process::exit(self.state().exit_code());
    }
}
