mod plan;

use clap::Parser;

use crate::args::BenchArgs;
use crate::error::{AppError, AppResult, ValidationError};
use plan::{build_plan, execute_plan};

/// Parses the command line, sets up logging and runs the chosen command.
///
/// # Errors
///
/// Returns an error when startup fails, a run fails, or a run finishes with
/// too many failed checks.
pub fn run() -> AppResult<()> {
    let args = BenchArgs::parse();

    crate::logger::init_logging(args.verbose, args.no_color);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|err| AppError::validation(ValidationError::RuntimeBuildFailed { source: err }))?;

    runtime.block_on(async {
        let plan = build_plan(args.command)?;
        execute_plan(plan).await
    })
}
