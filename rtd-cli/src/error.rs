//! Error types emitted by the RTD routes CLI.

use std::sync::Arc;

use camino::Utf8PathBuf;
use rtd_core::GeoPointError;
use rtd_data::ProviderBuildError;
use rtd_engine::EngineError;
use thiserror::Error;

/// Errors emitted by the RTD routes CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        field: &'static str,
        env: &'static str,
    },
    /// A trip endpoint is out of range.
    #[error("{field} is not a valid coordinate: {source}")]
    InvalidCoordinate {
        field: &'static str,
        #[source]
        source: GeoPointError,
    },
    /// Building the async runtime failed.
    #[error("failed to start async runtime: {0}")]
    Runtime(#[source] std::io::Error),
    /// Constructing the directions provider failed.
    #[error("failed to build directions provider for {base_url:?}: {source}")]
    BuildDirectionsProvider {
        base_url: String,
        #[source]
        source: ProviderBuildError,
    },
    /// The engine rejected the request or a provider call failed.
    #[error(transparent)]
    Engine(#[from] EngineError),
    /// The engine finished without producing a trip route.
    #[error("no trip route was produced for the given endpoints")]
    NoTripRoute,
    /// Opening a trip route record failed.
    #[error("failed to read trip route at {path:?}: {source}")]
    ReadRecord {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// A trip route record was not valid JSON.
    #[error("failed to parse trip route JSON at {path:?}: {source}")]
    ParseRecord {
        path: Utf8PathBuf,
        #[source]
        source: serde_json::Error,
    },
    /// Serializing command output failed.
    #[error("failed to serialize output: {0}")]
    SerializeOutput(#[source] serde_json::Error),
    /// Writing command output failed.
    #[error("failed to write output: {0}")]
    WriteOutput(#[source] std::io::Error),
}
