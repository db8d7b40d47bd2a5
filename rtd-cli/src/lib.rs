//! Command-line interface for planning and inspecting RTD trip routes.
#![forbid(unsafe_code)]

use std::io::Write;

use clap::{Parser, Subcommand};
use serde::Serialize;

mod error;
mod plan;
mod records;

pub use error::CliError;
use plan::{PlanArgs, run_plan};
use records::{MetricsArgs, ReconcileArgs, run_metrics, run_reconcile};

const ARG_SOURCE_LAT: &str = "source-lat";
const ARG_SOURCE_LNG: &str = "source-lng";
const ARG_DESTINATION_LAT: &str = "destination-lat";
const ARG_DESTINATION_LNG: &str = "destination-lng";
const ENV_SOURCE_LAT: &str = "RTD_CMDS_PLAN_SOURCE_LAT";
const ENV_SOURCE_LNG: &str = "RTD_CMDS_PLAN_SOURCE_LNG";
const ENV_DESTINATION_LAT: &str = "RTD_CMDS_PLAN_DESTINATION_LAT";
const ENV_DESTINATION_LNG: &str = "RTD_CMDS_PLAN_DESTINATION_LNG";

/// Run the RTD routes CLI with the current process arguments and environment.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    match cli.command {
        Command::Plan(args) => run_plan(args),
        Command::Reconcile(args) => run_reconcile(&args, &mut std::io::stdout().lock()),
        Command::Metrics(args) => run_metrics(&args, &mut std::io::stdout().lock()),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "rtd-routes",
    about = "Plan and inspect round-trip delivery routes",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Compute outbound and return routes between two points.
    Plan(PlanArgs),
    /// Normalise a stored trip route record.
    Reconcile(ReconcileArgs),
    /// Print aggregate distance and duration of a stored trip route.
    Metrics(MetricsArgs),
}

fn write_json<T: Serialize>(writer: &mut dyn Write, value: &T) -> Result<(), CliError> {
    let payload = serde_json::to_string_pretty(value).map_err(CliError::SerializeOutput)?;
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WriteOutput)?;
    writer.write_all(b"\n").map_err(CliError::WriteOutput)?;
    Ok(())
}

#[cfg(test)]
mod tests;
