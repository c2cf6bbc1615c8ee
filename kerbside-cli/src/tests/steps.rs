//! Behaviour-driven step definitions driving the planning commands.

use super::helpers::{
    DESTINATION, RESIDENT_ENTRY, START, StubPlannerBuilder, VISITOR_ENTRY, decode_json,
    decode_route, destination_kerbs,
};
use super::*;
use crate::parking_spots::run_parking_spots_with;
use crate::route::{run_route_with, run_route_with_parking_with};
use kerbside_core::GatewayError;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use std::cell::RefCell;

#[derive(Debug, Default)]
struct CommandWorld {
    builder: RefCell<StubPlannerBuilder>,
    stdout: RefCell<Vec<u8>>,
    result: RefCell<Option<Result<(), CliError>>>,
}

impl CommandWorld {
    fn run(&self, argv: &[String]) {
        let parsed = Cli::try_parse_from(argv).map_err(CliError::from);
        let builder = self.builder.borrow();
        let mut stdout = self.stdout.borrow_mut();
        let outcome = parsed.and_then(|cli| match cli.command {
            Command::Route(args) => run_route_with(args, &*builder, &mut *stdout),
            Command::RouteWithParking(args) => {
                run_route_with_parking_with(args, &*builder, &mut *stdout)
            }
            Command::ParkingSpots(args) => run_parking_spots_with(args, &*builder, &mut *stdout),
        });
        self.result.replace(Some(outcome));
    }

    fn error(&self) -> std::cell::Ref<'_, CliError> {
        std::cell::Ref::map(self.result.borrow(), |result| match result {
            Some(Err(err)) => err,
            Some(Ok(())) => panic!("expected the command to fail"),
            None => panic!("result must be recorded"),
        })
    }

    fn assert_succeeded(&self) {
        match self.result.borrow().as_ref() {
            Some(Ok(())) => {}
            Some(Err(err)) => panic!("expected success, found {err:?}"),
            None => panic!("result must be recorded"),
        }
    }
}

fn flag(name: &str, value: f64) -> [String; 2] {
    [format!("--{name}"), value.to_string()]
}

#[fixture]
fn world() -> CommandWorld {
    CommandWorld::default()
}

#[given("kerbs beside the destination")]
fn kerbs_beside_destination(#[from(world)] world: &CommandWorld) {
    world
        .builder
        .replace(StubPlannerBuilder::with_features(destination_kerbs()));
}

#[given("an unreachable kerb provider")]
fn unreachable_kerb_provider(#[from(world)] world: &CommandWorld) {
    world
        .builder
        .replace(StubPlannerBuilder::failing_kerbs(GatewayError::UpstreamUnavailable {
            url: "http://kerb.test/features".to_owned(),
            message: "connection refused".to_owned(),
        }));
}

#[when("I run route-with-parking from the start to the destination")]
fn run_route_with_parking(#[from(world)] world: &CommandWorld) {
    let mut argv = vec!["kerbside".to_owned(), "route-with-parking".to_owned()];
    argv.extend(flag(ARG_START_LAT, START.lat));
    argv.extend(flag(ARG_START_LON, START.lon));
    argv.extend(flag(ARG_END_LAT, DESTINATION.lat));
    argv.extend(flag(ARG_END_LON, DESTINATION.lon));
    world.run(&argv);
}

#[when("I run route-with-parking without a destination")]
fn run_route_with_parking_without_destination(#[from(world)] world: &CommandWorld) {
    let mut argv = vec!["kerbside".to_owned(), "route-with-parking".to_owned()];
    argv.extend(flag(ARG_START_LAT, START.lat));
    argv.extend(flag(ARG_START_LON, START.lon));
    world.run(&argv);
}

#[when("I run parking-spots for resident parking at the destination")]
fn run_resident_parking_spots(#[from(world)] world: &CommandWorld) {
    let mut argv = vec!["kerbside".to_owned(), "parking-spots".to_owned()];
    argv.extend(flag(ARG_LAT, DESTINATION.lat));
    argv.extend(flag(ARG_LON, DESTINATION.lon));
    argv.extend([format!("--{ARG_REASON}"), "resident".to_owned()]);
    world.run(&argv);
}

#[then("the printed route visits the larger kerb first")]
fn route_visits_larger_kerb_first(#[from(world)] world: &CommandWorld) {
    world.assert_succeeded();
    assert_eq!(
        decode_route(&world.stdout.borrow()),
        [START, VISITOR_ENTRY, RESIDENT_ENTRY, DESTINATION]
    );
}

#[then("only the resident kerb is printed")]
fn only_resident_kerb_printed(#[from(world)] world: &CommandWorld) {
    world.assert_succeeded();
    let value = decode_json(&world.stdout.borrow());
    let ids: Vec<&str> = value
        .as_array()
        .expect("output is an array")
        .iter()
        .filter_map(|spot| spot["id"].as_str())
        .collect();
    assert_eq!(ids, ["kerb-resident"]);
}

#[then("the command fails because the end latitude is missing")]
fn fails_missing_end_latitude(#[from(world)] world: &CommandWorld) {
    match &*world.error() {
        CliError::MissingArgument { field, env } => {
            assert_eq!(*field, ARG_END_LAT);
            assert_eq!(*env, ENV_PARKED_END_LAT);
        }
        other => panic!("expected MissingArgument, found {other:?}"),
    }
}

#[then("the error envelope reports an unavailable upstream")]
fn envelope_reports_unavailable(#[from(world)] world: &CommandWorld) {
    let err = world.error();
    let mut envelope = Vec::new();
    write_error(&mut envelope, &err).expect("envelope should be written");

    let value = decode_json(&envelope);
    assert_eq!(value["error"]["kind"], "UpstreamUnavailable");
    assert!(world.stdout.borrow().is_empty());
}

macro_rules! register_command_scenario {
    ($fn_name:ident, $scenario_title:literal) => {
        #[scenario(path = "tests/features/cli_commands.feature", name = $scenario_title)]
        fn $fn_name(#[from(world)] world: CommandWorld) {
            let _ = world;
        }
    };
}

register_command_scenario!(printing_a_parking_aware_route, "printing a parking-aware route");
register_command_scenario!(
    searching_for_resident_parking_spots,
    "searching for resident parking spots"
);
register_command_scenario!(rejecting_a_missing_destination, "rejecting a missing destination");
register_command_scenario!(
    reporting_an_unavailable_kerb_provider,
    "reporting an unavailable kerb provider"
);
