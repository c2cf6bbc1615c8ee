//! `route` and `route-with-parking` command implementations.

use std::io::Write;

use clap::Parser;
use kerbside_core::{LatLon, RoutePolyline, RouteRequest};
use log::info;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::gateways::{GatewayConfig, HttpPlannerBuilder, PlannerBuilder};
use crate::{
    ARG_DIRECTIONS_ACCESS_TOKEN, ARG_DIRECTIONS_BASE_URL, ARG_END_LAT, ARG_END_LON,
    ARG_KERB_API_KEY, ARG_KERB_BASE_URL, ARG_RADIUS_KM, ARG_REASON, ARG_START_LAT, ARG_START_LON,
    ARG_TIMEOUT_SECS, CliError, ENV_PARKED_END_LAT, ENV_PARKED_END_LON, ENV_PARKED_START_LAT,
    ENV_PARKED_START_LON, ENV_ROUTE_END_LAT, ENV_ROUTE_END_LON, ENV_ROUTE_START_LAT,
    ENV_ROUTE_START_LON, write_json,
};

/// CLI arguments for the `route` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    name = "route",
    about = "Route directly between two points",
    long_about = "Fetch a driving route from start to end without a parking \
                 detour. Prints the route as a JSON array of [lat, lon] pairs."
)]
#[ortho_config(prefix = "KERBSIDE")]
pub(crate) struct RouteArgs {
    /// Latitude of the journey origin.
    #[arg(long = ARG_START_LAT, value_name = "degrees", allow_negative_numbers = true)]
    #[serde(default)]
    pub(crate) start_lat: Option<f64>,
    /// Longitude of the journey origin.
    #[arg(long = ARG_START_LON, value_name = "degrees", allow_negative_numbers = true)]
    #[serde(default)]
    pub(crate) start_lon: Option<f64>,
    /// Latitude of the destination.
    #[arg(long = ARG_END_LAT, value_name = "degrees", allow_negative_numbers = true)]
    #[serde(default)]
    pub(crate) end_lat: Option<f64>,
    /// Longitude of the destination.
    #[arg(long = ARG_END_LON, value_name = "degrees", allow_negative_numbers = true)]
    #[serde(default)]
    pub(crate) end_lon: Option<f64>,
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

/// CLI arguments for the `route-with-parking` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    name = "route-with-parking",
    about = "Route between two points via parking near the destination",
    long_about = "Search for regulated kerbs around the destination, rank them \
                 by estimated capacity and fetch a driving route that visits \
                 them before arriving. Prints the route as a JSON array of \
                 [lat, lon] pairs."
)]
#[ortho_config(prefix = "KERBSIDE")]
pub(crate) struct RouteWithParkingArgs {
    /// Latitude of the journey origin.
    #[arg(long = ARG_START_LAT, value_name = "degrees", allow_negative_numbers = true)]
    #[serde(default)]
    pub(crate) start_lat: Option<f64>,
    /// Longitude of the journey origin.
    #[arg(long = ARG_START_LON, value_name = "degrees", allow_negative_numbers = true)]
    #[serde(default)]
    pub(crate) start_lon: Option<f64>,
    /// Latitude of the destination.
    #[arg(long = ARG_END_LAT, value_name = "degrees", allow_negative_numbers = true)]
    #[serde(default)]
    pub(crate) end_lat: Option<f64>,
    /// Longitude of the destination.
    #[arg(long = ARG_END_LON, value_name = "degrees", allow_negative_numbers = true)]
    #[serde(default)]
    pub(crate) end_lon: Option<f64>,
    /// Half-width of the parking search box in kilometres (default 0.25).
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

impl RouteArgs {
    pub(crate) fn into_config(self) -> Result<RouteConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        RouteConfig::try_from(merged)
    }
}

impl RouteWithParkingArgs {
    pub(crate) fn into_config(self) -> Result<RouteWithParkingConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        RouteWithParkingConfig::try_from(merged)
    }
}

/// Resolved `route` configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RouteConfig {
    pub(crate) start: LatLon,
    pub(crate) end: LatLon,
    pub(crate) gateways: GatewayConfig,
}

/// Resolved `route-with-parking` configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RouteWithParkingConfig {
    pub(crate) request: RouteRequest,
    pub(crate) gateways: GatewayConfig,
}

pub(crate) fn require(
    value: Option<f64>,
    field: &'static str,
    env: &'static str,
) -> Result<f64, CliError> {
    value.ok_or(CliError::MissingArgument { field, env })
}

impl TryFrom<RouteArgs> for RouteConfig {
    type Error = CliError;

    fn try_from(args: RouteArgs) -> Result<Self, Self::Error> {
        let start = LatLon::new(
            require(args.start_lat, ARG_START_LAT, ENV_ROUTE_START_LAT)?,
            require(args.start_lon, ARG_START_LON, ENV_ROUTE_START_LON)?,
        );
        let end = LatLon::new(
            require(args.end_lat, ARG_END_LAT, ENV_ROUTE_END_LAT)?,
            require(args.end_lon, ARG_END_LON, ENV_ROUTE_END_LON)?,
        );
        let gateways = GatewayConfig::resolve(
            args.kerb_base_url,
            args.kerb_api_key,
            args.directions_base_url,
            args.directions_access_token,
            args.timeout_secs,
        );
        Ok(Self {
            start,
            end,
            gateways,
        })
    }
}

impl TryFrom<RouteWithParkingArgs> for RouteWithParkingConfig {
    type Error = CliError;

    fn try_from(args: RouteWithParkingArgs) -> Result<Self, Self::Error> {
        let start = LatLon::new(
            require(args.start_lat, ARG_START_LAT, ENV_PARKED_START_LAT)?,
            require(args.start_lon, ARG_START_LON, ENV_PARKED_START_LON)?,
        );
        let end = LatLon::new(
            require(args.end_lat, ARG_END_LAT, ENV_PARKED_END_LAT)?,
            require(args.end_lon, ARG_END_LON, ENV_PARKED_END_LON)?,
        );
        let request = RouteRequest {
            start,
            end,
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

pub(super) fn run_route(args: RouteArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_route_with(args, &HttpPlannerBuilder, &mut stdout)
}

pub(super) fn run_route_with(
    args: RouteArgs,
    builder: &dyn PlannerBuilder,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = args.into_config()?;
    let route = execute_route(&config, builder)?;
    write_json(writer, &route)
}

pub(crate) fn execute_route(
    config: &RouteConfig,
    builder: &dyn PlannerBuilder,
) -> Result<RoutePolyline, CliError> {
    let planner = builder.build(&config.gateways)?;
    info!("routing {:?} -> {:?}", config.start, config.end);
    Ok(planner.route(config.start, config.end)?)
}

pub(super) fn run_route_with_parking(args: RouteWithParkingArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_route_with_parking_with(args, &HttpPlannerBuilder, &mut stdout)
}

pub(super) fn run_route_with_parking_with(
    args: RouteWithParkingArgs,
    builder: &dyn PlannerBuilder,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = args.into_config()?;
    let route = execute_route_with_parking(&config, builder)?;
    write_json(writer, &route)
}

pub(crate) fn execute_route_with_parking(
    config: &RouteWithParkingConfig,
    builder: &dyn PlannerBuilder,
) -> Result<RoutePolyline, CliError> {
    let planner = builder.build(&config.gateways)?;
    info!(
        "routing {:?} -> {:?} via parking within {} km",
        config.request.start,
        config.request.end,
        config.request.radius_km()
    );
    Ok(planner.route_with_parking(&config.request)?)
}

#[cfg(test)]
pub(crate) fn route_config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<RouteConfig, CliError> {
    let merged = RouteArgs::merge_from_layers(layers).map_err(CliError::from)?;
    RouteConfig::try_from(merged)
}

#[cfg(test)]
pub(crate) fn route_with_parking_config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<RouteWithParkingConfig, CliError> {
    let merged = RouteWithParkingArgs::merge_from_layers(layers).map_err(CliError::from)?;
    RouteWithParkingConfig::try_from(merged)
}
