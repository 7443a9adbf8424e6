use std::path::PathBuf;

use tracing::{error, info};

use crate::args::{
    CheckArgs, FrontendCommand, OutputFormat, ShowArgs, TailwindVariant, UnifyArgs, ValidateArgs,
};
use crate::config::LoadPlan;
use crate::error::{AppError, AppResult};
use crate::frontend::{
    FrontendConfig, HygieneReport, TailwindConfig, load_descriptor, render_config,
    scan_duplicates, unify, validate_config,
};
use crate::http::{ClientOptions, build_client};
use crate::report::{compute_summary_stats, enforce_check_threshold, print_summary, render_json};
use crate::runner::run_load;
use crate::shutdown::{setup_signal_shutdown_handler, shutdown_channel};

use super::types::RunPlan;

pub(crate) async fn execute_plan(plan: RunPlan) -> AppResult<()> {
    match plan {
        RunPlan::Load(plan) => run_load_plan(*plan).await,
        RunPlan::Frontend(command) => match command {
            FrontendCommand::Check(args) => frontend_check(&args),
            FrontendCommand::Validate(args) => frontend_validate(&args),
            FrontendCommand::Unify(args) => frontend_unify(&args),
            FrontendCommand::Show(args) => frontend_show(&args),
        },
    }
}

async fn run_load_plan(plan: LoadPlan) -> AppResult<()> {
    let scenario = plan.settings.build().inspect_err(|err| {
        error!("Startup failed: {}", err);
    })?;
    let client = build_client(ClientOptions {
        request_timeout: plan.request_timeout,
    })?;

    let (shutdown_tx, _) = shutdown_channel();
    let signal_handle = setup_signal_shutdown_handler(&shutdown_tx);
    let result = run_load(scenario, client, &plan.load, &shutdown_tx).await;
    drop(shutdown_tx.send(()));
    drop(signal_handle.await);
    let report = result?;

    match plan.output_format {
        OutputFormat::Text => print_summary(&report, &compute_summary_stats(&report)),
        OutputFormat::Json => println!("{}", render_json(&report)?),
    }
    enforce_check_threshold(&report, plan.max_check_failures_pct)
}

fn frontend_check(args: &CheckArgs) -> AppResult<()> {
    let report = scan_duplicates(&args.root)?;
    match args.output_format {
        OutputFormat::Text => print_hygiene(&report),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }
    if report.is_clean() {
        return Ok(());
    }
    Err(AppError::DuplicateConfigs {
        count: report.duplicates.len(),
    })
}

fn print_hygiene(report: &HygieneReport) {
    println!("Root: {}", report.root.display());
    println!("Config Files: {}", report.config_files);
    if report.is_clean() {
        println!("Duplicates: none");
        return;
    }
    println!("Duplicates: {}", report.duplicates.len());
    for group in &report.duplicates {
        println!(
            "  {} ({}):",
            group.kind,
            if group.identical {
                "identical"
            } else {
                "divergent"
            }
        );
        for file in &group.files {
            println!("    {}", file.display());
        }
    }
}

fn frontend_validate(args: &ValidateArgs) -> AppResult<()> {
    let config = load_descriptor(&args.path)?.resolve();
    validate_config(&config)?;
    info!("'{}' is valid.", args.path.display());
    println!("{}: ok", args.path.display());
    Ok(())
}

fn frontend_unify(args: &UnifyArgs) -> AppResult<()> {
    let variants = args
        .paths
        .iter()
        .map(|path| load_descriptor(path).map(|descriptor| (path.clone(), descriptor)))
        .collect::<Result<Vec<(PathBuf, _)>, _>>()?;
    let config = unify(&variants, args.prefer.as_deref())?.resolve();
    validate_config(&config)?;
    println!("{}", render_config(&config, args.format)?);
    Ok(())
}

fn frontend_show(args: &ShowArgs) -> AppResult<()> {
    let mut config = FrontendConfig::default();
    if let Some(TailwindVariant::Autumn) = args.tailwind {
        config.tailwind = TailwindConfig::autumn();
    }
    validate_config(&config)?;
    println!("{}", render_config(&config, args.format)?);
    Ok(())
}
