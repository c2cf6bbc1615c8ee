//! Command-line interface for the Kerbside parking-aware route planner.
#![forbid(unsafe_code)]

use std::io::Write;

use clap::{Parser, Subcommand};
use serde::Serialize;

mod error;
mod gateways;
mod parking_spots;
mod route;

pub use error::CliError;

use parking_spots::ParkingSpotsArgs;
use route::{RouteArgs, RouteWithParkingArgs};

const ARG_START_LAT: &str = "start-lat";
const ARG_START_LON: &str = "start-lon";
const ARG_END_LAT: &str = "end-lat";
const ARG_END_LON: &str = "end-lon";
const ARG_LAT: &str = "lat";
const ARG_LON: &str = "lon";
const ARG_RADIUS_KM: &str = "radius-km";
const ARG_REASON: &str = "reason";
const ARG_KERB_API_KEY: &str = "kerb-api-key";
const ARG_KERB_BASE_URL: &str = "kerb-base-url";
const ARG_DIRECTIONS_ACCESS_TOKEN: &str = "directions-access-token";
const ARG_DIRECTIONS_BASE_URL: &str = "directions-base-url";
const ARG_TIMEOUT_SECS: &str = "timeout-secs";

const ENV_ROUTE_START_LAT: &str = "KERBSIDE_CMDS_ROUTE_START_LAT";
const ENV_ROUTE_START_LON: &str = "KERBSIDE_CMDS_ROUTE_START_LON";
const ENV_ROUTE_END_LAT: &str = "KERBSIDE_CMDS_ROUTE_END_LAT";
const ENV_ROUTE_END_LON: &str = "KERBSIDE_CMDS_ROUTE_END_LON";
const ENV_PARKED_START_LAT: &str = "KERBSIDE_CMDS_ROUTE_WITH_PARKING_START_LAT";
const ENV_PARKED_START_LON: &str = "KERBSIDE_CMDS_ROUTE_WITH_PARKING_START_LON";
const ENV_PARKED_END_LAT: &str = "KERBSIDE_CMDS_ROUTE_WITH_PARKING_END_LAT";
const ENV_PARKED_END_LON: &str = "KERBSIDE_CMDS_ROUTE_WITH_PARKING_END_LON";
const ENV_SPOTS_LAT: &str = "KERBSIDE_CMDS_PARKING_SPOTS_LAT";
const ENV_SPOTS_LON: &str = "KERBSIDE_CMDS_PARKING_SPOTS_LON";

/// Run the Kerbside CLI with the current process arguments and environment.
///
/// Results are written to stdout as pretty-printed JSON.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    match cli.command {
        Command::Route(args) => route::run_route(args),
        Command::RouteWithParking(args) => route::run_route_with_parking(args),
        Command::ParkingSpots(args) => parking_spots::run_parking_spots(args),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "kerbside",
    about = "Plan driving routes that pass the best-stocked kerbside parking",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Route directly from start to end.
    Route(RouteArgs),
    /// Route from start to end via parking near the destination.
    RouteWithParking(RouteWithParkingArgs),
    /// List regulated kerbs around a point with their estimated capacity.
    ParkingSpots(ParkingSpotsArgs),
}

#[derive(Debug, Serialize)]
struct ErrorEnvelope<'a> {
    error: ErrorBody<'a>,
}

#[derive(Debug, Serialize)]
struct ErrorBody<'a> {
    kind: &'a str,
    message: String,
}

/// Write `err` as `{"error": {"kind": ..., "message": ...}}` followed by a
/// newline.
///
/// # Errors
/// Returns [`CliError::WriteOutput`] or [`CliError::SerialiseOutput`] when
/// the envelope cannot be written.
pub fn write_error(writer: &mut dyn Write, err: &CliError) -> Result<(), CliError> {
    let envelope = ErrorEnvelope {
        error: ErrorBody {
            kind: err.kind(),
            message: err.to_string(),
        },
    };
    write_json(writer, &envelope)
}

fn write_json<T: Serialize + ?Sized>(writer: &mut dyn Write, value: &T) -> Result<(), CliError> {
    let payload = serde_json::to_string_pretty(value).map_err(CliError::SerialiseOutput)?;
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WriteOutput)?;
    writer.write_all(b"\n").map_err(CliError::WriteOutput)?;
    Ok(())
}

#[cfg(test)]
mod tests;
