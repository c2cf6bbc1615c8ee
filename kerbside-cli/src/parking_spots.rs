//! `parking-spots` command implementation.

use std::io::Write;

use clap::Parser;
use kerbside_core::{KerbFeature, LatLon, ParkingSpotsRequest};
use log::info;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::gateways::{GatewayConfig, HttpPlannerBuilder, PlannerBuilder};
use crate::route::require;
use crate::{
    ARG_DIRECTIONS_ACCESS_TOKEN, ARG_DIRECTIONS_BASE_URL, ARG_KERB_API_KEY, ARG_KERB_BASE_URL,
    ARG_LAT, ARG_LON, ARG_RADIUS_KM, ARG_REASON, ARG_TIMEOUT_SECS, CliError, ENV_SPOTS_LAT,
    ENV_SPOTS_LON, write_json,
};

/// CLI arguments for the `parking-spots` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    name = "parking-spots",
    about = "List regulated kerbs around a point",
    long_about = "Search for kerb segments inside a square box around a \
                 point, keep those whose regulations match the requested \
                 reason, and print them with their estimated capacity as \
                 JSON."
)]
#[ortho_config(prefix = "KERBSIDE")]
pub(crate) struct ParkingSpotsArgs {
    /// Latitude of the search centre.
    #[arg(long = ARG_LAT, value_name = "degrees", allow_negative_numbers = true)]
    #[serde(default)]
    pub(crate) lat: Option<f64>,
    /// Longitude of the search centre.
    #[arg(long = ARG_LON, value_name = "degrees", allow_negative_numbers = true)]
    #[serde(default)]
    pub(crate) lon: Option<f64>,
    /// Half-width of the search box in kilometres (default 0.25).
    #[arg(long = ARG_RADIUS_KM, value_name = "km")]
    #[serde(default)]
    pub(crate) radius_km: Option<f64>,
    /// Regulation reason to match, e.g. "resident".
    #[arg(long = ARG_REASON, value_name = "reason")]
    #[serde(default)]
    pub(crate) reason: Option<String>,
    /// Subscription key for the kerb-regulation API.
    #[arg(long = ARG_KERB_API_KEY, value_name = "key")]
    #[serde(default)]
    pub(crate) kerb_api_key: Option<String>,
    /// Base URL of the kerb-regulation API.
    #[arg(long = ARG_KERB_BASE_URL, value_name = "url")]
    #[serde(default)]
    pub(crate) kerb_base_url: Option<String>,
    /// Access token for the directions API.
    #[arg(long = ARG_DIRECTIONS_ACCESS_TOKEN, value_name = "token")]
    #[serde(default)]
    pub(crate) directions_access_token: Option<String>,
    /// Base URL of the directions API.
    #[arg(long = ARG_DIRECTIONS_BASE_URL, value_name = "url")]
    #[serde(default)]
    pub(crate) directions_base_url: Option<String>,
    /// Per-request timeout for upstream calls.
    #[arg(long = ARG_TIMEOUT_SECS, value_name = "seconds")]
    #[serde(default)]
    pub(crate) timeout_secs: Option<u64>,
}

impl ParkingSpotsArgs {
    pub(crate) fn into_config(self) -> Result<ParkingSpotsConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        ParkingSpotsConfig::try_from(merged)
    }
}

/// Resolved `parking-spots` configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ParkingSpotsConfig {
    pub(crate) request: ParkingSpotsRequest,
    pub(crate) gateways: GatewayConfig,
}

impl TryFrom<ParkingSpotsArgs> for ParkingSpotsConfig {
    type Error = CliError;

    fn try_from(args: ParkingSpotsArgs) -> Result<Self, Self::Error> {
        let centre = LatLon::new(
            require(args.lat, ARG_LAT, ENV_SPOTS_LAT)?,
            require(args.lon, ARG_LON, ENV_SPOTS_LON)?,
        );
        let request = ParkingSpotsRequest {
            centre,
            radius_km: args.radius_km,
            reason: args.reason,
        };
        let gateways = GatewayConfig::resolve(
            args.kerb_base_url,
            args.kerb_api_key,
            args.directions_base_url,
            args.directions_access_token,
            args.timeout_secs,
        );
        Ok(Self { request, gateways })
    }
}

pub(super) fn run_parking_spots(args: ParkingSpotsArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_parking_spots_with(args, &HttpPlannerBuilder, &mut stdout)
}

pub(super) fn run_parking_spots_with(
    args: ParkingSpotsArgs,
    builder: &dyn PlannerBuilder,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = args.into_config()?;
    let spots = execute_parking_spots(&config, builder)?;
    write_json(writer, &spots)
}

pub(crate) fn execute_parking_spots(
    config: &ParkingSpotsConfig,
    builder: &dyn PlannerBuilder,
) -> Result<Vec<KerbFeature>, CliError> {
    let planner = builder.build(&config.gateways)?;
    info!(
        "searching for parking within {} km of {:?}",
        config.request.radius_km(),
        config.request.centre
    );
    Ok(planner.parking_spots(&config.request)?)
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<ParkingSpotsConfig, CliError> {
    let merged = ParkingSpotsArgs::merge_from_layers(layers).map_err(CliError::from)?;
    ParkingSpotsConfig::try_from(merged)
}
