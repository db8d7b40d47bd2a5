//! `reconcile` and `metrics` commands over persisted trip route records.

use std::io::{Read, Write};

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs_utf8};
use clap::Parser;
use rtd_core::TripRoute;
use rtd_core::metrics::TripMetrics;
use rtd_core::reconcile::parse_trip_route;

use crate::{CliError, write_json};

/// CLI arguments for the `reconcile` subcommand.
#[derive(Debug, Clone, Parser)]
#[command(
    long_about = "Read a stored trip route record, repair loosely-typed \
                 coordinates and missing fields, and print the normalised \
                 record as JSON.",
    about = "Normalise a stored trip route record"
)]
pub(crate) struct ReconcileArgs {
    /// Path to a JSON trip route record.
    #[arg(value_name = "path")]
    pub(crate) path: Utf8PathBuf,
}

/// CLI arguments for the `metrics` subcommand.
#[derive(Debug, Clone, Parser)]
#[command(about = "Print total distance and duration of a stored trip route")]
pub(crate) struct MetricsArgs {
    /// Path to a JSON trip route record.
    #[arg(value_name = "path")]
    pub(crate) path: Utf8PathBuf,
}

/// Load and reconcile a trip route record from disk.
pub(crate) fn load_trip_route(path: &Utf8Path) -> Result<TripRoute, CliError> {
    let mut file =
        fs_utf8::File::open_ambient(path, ambient_authority()).map_err(|source| {
            CliError::ReadRecord {
                path: path.to_path_buf(),
                source,
            }
        })?;
    let mut text = String::new();
    file.read_to_string(&mut text)
        .map_err(|source| CliError::ReadRecord {
            path: path.to_path_buf(),
            source,
        })?;
    parse_trip_route(&text, None).map_err(|source| CliError::ParseRecord {
        path: path.to_path_buf(),
        source,
    })
}

pub(crate) fn run_reconcile(args: &ReconcileArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let trip = load_trip_route(&args.path)?;
    write_json(writer, &trip)
}

pub(crate) fn run_metrics(args: &MetricsArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let trip = load_trip_route(&args.path)?;
    let metrics = TripMetrics::from_trip_route(&trip);
    writeln!(writer, "total distance: {}", metrics.total_distance).map_err(CliError::WriteOutput)?;
    writeln!(writer, "total duration: {}", metrics.total_duration).map_err(CliError::WriteOutput)?;
    Ok(())
}
