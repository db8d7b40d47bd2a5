//! Plan command implementation for the RTD routes CLI.

use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use log::info;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use rtd_core::{DirectionsProvider, GeoPoint, HeadlessRenderer, TripRoute};
use rtd_data::{HttpDirectionsProvider, HttpDirectionsProviderConfig};
use rtd_engine::{ComputeOutcome, DualRouteEngine, EngineConfig};
use serde::{Deserialize, Serialize};

use crate::{
    ARG_DESTINATION_LAT, ARG_DESTINATION_LNG, ARG_SOURCE_LAT, ARG_SOURCE_LNG, CliError,
    ENV_DESTINATION_LAT, ENV_DESTINATION_LNG, ENV_SOURCE_LAT, ENV_SOURCE_LNG, write_json,
};

/// CLI arguments for the `plan` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Compute outbound and return route alternatives between a \
                 source and a destination, select the shortest of each, and \
                 print the resulting trip route record as JSON. Options can \
                 come from CLI flags, configuration files, or environment \
                 variables.",
    about = "Plan a round trip between two points"
)]
#[ortho_config(prefix = "RTD")]
pub(crate) struct PlanArgs {
    /// Source latitude in decimal degrees.
    #[arg(long = ARG_SOURCE_LAT, value_name = "deg", allow_hyphen_values = true)]
    #[serde(default)]
    pub(crate) source_lat: Option<f64>,
    /// Source longitude in decimal degrees.
    #[arg(long = ARG_SOURCE_LNG, value_name = "deg", allow_hyphen_values = true)]
    #[serde(default)]
    pub(crate) source_lng: Option<f64>,
    /// Destination latitude in decimal degrees.
    #[arg(long = ARG_DESTINATION_LAT, value_name = "deg", allow_hyphen_values = true)]
    #[serde(default)]
    pub(crate) destination_lat: Option<f64>,
    /// Destination longitude in decimal degrees.
    #[arg(long = ARG_DESTINATION_LNG, value_name = "deg", allow_hyphen_values = true)]
    #[serde(default)]
    pub(crate) destination_lng: Option<f64>,
    /// Root of the directions service (e.g. "https://maps.googleapis.com").
    #[arg(long = "directions-base-url", value_name = "url")]
    #[serde(default)]
    pub(crate) directions_base_url: Option<String>,
    /// API key for the directions service.
    #[arg(long = "api-key", value_name = "key")]
    #[serde(default)]
    pub(crate) api_key: Option<String>,
    /// Request timeout in seconds.
    #[arg(long = "timeout-secs", value_name = "secs")]
    #[serde(default)]
    pub(crate) timeout_secs: Option<u64>,
    /// Minimum number of candidates shown per direction.
    #[arg(long = "min-candidates", value_name = "count")]
    #[serde(default)]
    pub(crate) min_candidates: Option<usize>,
}

impl PlanArgs {
    pub(crate) fn into_config(self) -> Result<PlanConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        PlanConfig::try_from(merged)
    }
}

/// Resolved `plan` command configuration.
#[derive(Debug, Clone)]
pub(crate) struct PlanConfig {
    pub(crate) source: GeoPoint,
    pub(crate) destination: GeoPoint,
    pub(crate) provider: HttpDirectionsProviderConfig,
    pub(crate) engine: EngineConfig,
}

impl TryFrom<PlanArgs> for PlanConfig {
    type Error = CliError;

    fn try_from(args: PlanArgs) -> Result<Self, Self::Error> {
        let source = point(
            args.source_lat,
            args.source_lng,
            (ARG_SOURCE_LAT, ENV_SOURCE_LAT),
            (ARG_SOURCE_LNG, ENV_SOURCE_LNG),
        )?;
        let destination = point(
            args.destination_lat,
            args.destination_lng,
            (ARG_DESTINATION_LAT, ENV_DESTINATION_LAT),
            (ARG_DESTINATION_LNG, ENV_DESTINATION_LNG),
        )?;

        let mut provider = HttpDirectionsProviderConfig::default();
        if let Some(base_url) = args.directions_base_url {
            provider.base_url = base_url;
        }
        provider.api_key = args.api_key;
        if let Some(secs) = args.timeout_secs {
            provider = provider.with_timeout(Duration::from_secs(secs));
        }

        let mut engine = EngineConfig::default();
        if let Some(min_candidates) = args.min_candidates {
            engine = engine.with_min_candidates(min_candidates);
        }

        Ok(Self {
            source,
            destination,
            provider,
            engine,
        })
    }
}

fn point(
    lat: Option<f64>,
    lng: Option<f64>,
    (lat_field, lat_env): (&'static str, &'static str),
    (lng_field, lng_env): (&'static str, &'static str),
) -> Result<GeoPoint, CliError> {
    let lat = lat.ok_or(CliError::MissingArgument {
        field: lat_field,
        env: lat_env,
    })?;
    let lng = lng.ok_or(CliError::MissingArgument {
        field: lng_field,
        env: lng_env,
    })?;
    GeoPoint::new(lat, lng).map_err(|source| CliError::InvalidCoordinate {
        field: lat_field.trim_end_matches("-lat"),
        source,
    })
}

pub(crate) fn run_plan(args: PlanArgs) -> Result<(), CliError> {
    let config = args.into_config()?;
    let provider = HttpDirectionsProvider::with_config(config.provider.clone()).map_err(|source| {
        CliError::BuildDirectionsProvider {
            base_url: config.provider.base_url.clone(),
            source,
        }
    })?;
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(CliError::Runtime)?;
    let mut stdout = std::io::stdout().lock();
    runtime.block_on(run_plan_with(&config, Arc::new(provider), &mut stdout))
}

/// Compute and select routes for `config` using `provider`.
pub(crate) async fn execute_plan<P: DirectionsProvider>(
    config: &PlanConfig,
    provider: Arc<P>,
) -> Result<TripRoute, CliError> {
    let mut engine =
        DualRouteEngine::with_config(provider, HeadlessRenderer, config.engine.clone());
    info!(
        "planning trip ({}, {}) <-> ({}, {})",
        config.source.lat, config.source.lng, config.destination.lat, config.destination.lng
    );
    match engine
        .compute_routes(config.source, config.destination)
        .await?
    {
        ComputeOutcome::Applied(trip) => Ok(trip),
        ComputeOutcome::Skipped | ComputeOutcome::Superseded => Err(CliError::NoTripRoute),
    }
}

/// Plan a trip and write it to `writer`.
pub(crate) async fn run_plan_with<P: DirectionsProvider>(
    config: &PlanConfig,
    provider: Arc<P>,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let trip = execute_plan(config, provider).await?;
    write_json(writer, &trip)
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<PlanConfig, CliError> {
    let merged = PlanArgs::merge_from_layers(layers).map_err(CliError::from)?;
    PlanConfig::try_from(merged)
}
