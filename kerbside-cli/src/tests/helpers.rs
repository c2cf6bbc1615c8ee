//! Stub gateways and fixtures shared by the CLI tests.

use super::*;
use crate::gateways::{CliPlanner, GatewayConfig, PlannerBuilder};
use kerbside_core::test_support::{
    EchoDirectionsProvider, FailingDirectionsProvider, FailingKerbSource, MemoryKerbSource,
};
use kerbside_core::{
    DirectionsProvider, GatewayError, KerbFeatureSource, LatLon, LonLat, ParkingPlanner,
    RawKerbFeature, RegulationRule,
};
use std::cell::RefCell;

pub(super) const START: LatLon = LatLon::new(51.5074, -0.1278);
pub(super) const DESTINATION: LatLon = LatLon::new(51.5581, -0.1798);

/// Entry point of the ten metre resident kerb (capacity 2).
pub(super) const RESIDENT_ENTRY: LatLon = LatLon::new(51.5580, -0.1799);
/// Entry point of the thirty metre visitor kerb (capacity 6).
pub(super) const VISITOR_ENTRY: LatLon = LatLon::new(51.5582, -0.1797);

fn kerb(id: &str, points: [LonLat; 2], reason: &str) -> RawKerbFeature {
    match RawKerbFeature::try_new(id, &points, vec![RegulationRule::with_reason(reason)]) {
        Ok(feature) => feature,
        Err(err) => panic!("fixture kerb should be well formed: {err}"),
    }
}

/// A short resident kerb and a longer visitor kerb beside the destination.
pub(super) fn destination_kerbs() -> Vec<RawKerbFeature> {
    vec![
        kerb(
            "kerb-resident",
            [LonLat::new(-0.1799, 51.5580), LonLat::new(-0.1799, 51.5581)],
            "resident",
        ),
        kerb(
            "kerb-visitor",
            [LonLat::new(-0.1797, 51.5582), LonLat::new(-0.1797, 51.5585)],
            "visitor",
        ),
    ]
}

/// Builds planners over in-memory doubles and records the gateway settings
/// it was asked for.
#[derive(Debug, Default)]
pub(super) struct StubPlannerBuilder {
    features: Vec<RawKerbFeature>,
    kerb_error: Option<GatewayError>,
    directions_error: Option<GatewayError>,
    configs: RefCell<Vec<GatewayConfig>>,
}

impl StubPlannerBuilder {
    pub(super) fn with_features(features: Vec<RawKerbFeature>) -> Self {
        Self {
            features,
            ..Self::default()
        }
    }

    pub(super) fn failing_kerbs(error: GatewayError) -> Self {
        Self {
            kerb_error: Some(error),
            ..Self::default()
        }
    }

    pub(super) fn failing_directions(error: GatewayError) -> Self {
        Self {
            directions_error: Some(error),
            ..Self::default()
        }
    }

    pub(super) fn configs(&self) -> Vec<GatewayConfig> {
        self.configs.borrow().clone()
    }
}

impl PlannerBuilder for StubPlannerBuilder {
    fn build(&self, config: &GatewayConfig) -> Result<CliPlanner, CliError> {
        self.configs.borrow_mut().push(config.clone());
        let kerb_source: Box<dyn KerbFeatureSource> = match &self.kerb_error {
            Some(error) => Box::new(FailingKerbSource::new(error.clone())),
            None => Box::new(MemoryKerbSource::with_features(self.features.clone())),
        };
        let directions: Box<dyn DirectionsProvider> = match &self.directions_error {
            Some(error) => Box::new(FailingDirectionsProvider::new(error.clone())),
            None => Box::new(EchoDirectionsProvider),
        };
        Ok(ParkingPlanner::new(kerb_source, directions))
    }
}

/// Decode a route printed as `[[lat, lon], ...]`.
pub(super) fn decode_route(output: &[u8]) -> Vec<LatLon> {
    let pairs: Vec<[f64; 2]> = match serde_json::from_slice(output) {
        Ok(pairs) => pairs,
        Err(err) => panic!("output should be a JSON route: {err}"),
    };
    pairs
        .into_iter()
        .map(|[lat, lon]| LatLon::new(lat, lon))
        .collect()
}

/// Decode any JSON document printed by a command.
pub(super) fn decode_json(output: &[u8]) -> serde_json::Value {
    match serde_json::from_slice(output) {
        Ok(value) => value,
        Err(err) => panic!("output should be JSON: {err}"),
    }
}
